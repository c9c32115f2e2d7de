//! ABI layer for the formatted-output functions.
//!
//! C varargs cannot be read from stable Rust, so callers pass an array of
//! [`RtArg`] values tagged with the `RT_ARG_*` constants. Console output goes
//! through a `putc` callback registered with [`rtfmt_set_putc`]; the
//! `rt_printf_to` and `rt_snprintf` variants take their destination
//! explicitly.

use std::ffi::{CStr, c_char, c_double, c_int, c_void};

use parking_lot::RwLock;
use rtfmt_core::stdio::{FnSink, FormatArg, Formatter};

/// Character output callback: `void putc(char c)`.
pub type PutcFn = extern "C" fn(c_char);

pub const RT_ARG_INT: u32 = 0;
pub const RT_ARG_CHAR: u32 = 1;
pub const RT_ARG_STR: u32 = 2;
pub const RT_ARG_DOUBLE: u32 = 3;

/// Arguments past this count are ignored.
pub const MAX_RT_ARGS: usize = 32;

static PUTC: RwLock<Option<PutcFn>> = parking_lot::const_rwlock(None);

#[repr(C)]
#[derive(Clone, Copy)]
pub union RtArgValue {
    pub int: c_int,
    pub chr: c_char,
    pub str: *const c_char,
    pub dbl: c_double,
}

/// One tagged argument.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RtArg {
    pub tag: u32,
    pub value: RtArgValue,
}

impl RtArg {
    #[must_use]
    pub const fn int(v: c_int) -> Self {
        Self {
            tag: RT_ARG_INT,
            value: RtArgValue { int: v },
        }
    }

    #[must_use]
    pub const fn chr(c: c_char) -> Self {
        Self {
            tag: RT_ARG_CHAR,
            value: RtArgValue { chr: c },
        }
    }

    #[must_use]
    pub const fn str(s: *const c_char) -> Self {
        Self {
            tag: RT_ARG_STR,
            value: RtArgValue { str: s },
        }
    }

    #[must_use]
    pub const fn double(v: c_double) -> Self {
        Self {
            tag: RT_ARG_DOUBLE,
            value: RtArgValue { dbl: v },
        }
    }
}

impl std::fmt::Debug for RtArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtArg")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Install (or with NULL, clear) the console output callback.
#[unsafe(no_mangle)]
pub extern "C" fn rtfmt_set_putc(putc: Option<PutcFn>) {
    *PUTC.write() = putc;
}

/// Decodes one tagged argument. Returns `None` for an unknown tag.
///
/// # Safety
///
/// A string argument must be NULL or point to a NUL-terminated string that
/// outlives `'a`.
unsafe fn decode_arg<'a>(arg: &RtArg) -> Option<FormatArg<'a>> {
    // SAFETY: the tag selects the union field the caller initialized.
    unsafe {
        match arg.tag {
            RT_ARG_INT => Some(FormatArg::Int(arg.value.int)),
            RT_ARG_CHAR => Some(FormatArg::Char(arg.value.chr as u8)),
            RT_ARG_STR => {
                let p = arg.value.str;
                if p.is_null() {
                    Some(FormatArg::Str(b"(null)"))
                } else {
                    Some(FormatArg::Str(CStr::from_ptr(p).to_bytes()))
                }
            }
            RT_ARG_DOUBLE => Some(FormatArg::Double(arg.value.dbl)),
            _ => None,
        }
    }
}

/// Shared entry for the three exports: decodes the format and argument array
/// and hands them to `run`. Returns -1 on any boundary failure.
unsafe fn with_decoded(
    fmt: *const c_char,
    args: *const RtArg,
    nargs: c_int,
    run: impl FnOnce(&[u8], &[FormatArg<'_>]) -> c_int,
) -> c_int {
    if fmt.is_null() {
        return -1;
    }
    let count = usize::try_from(nargs).unwrap_or(0).min(MAX_RT_ARGS);
    let raw: &[RtArg] = if args.is_null() || count == 0 {
        &[]
    } else {
        // SAFETY: the caller guarantees `args` holds `nargs` entries.
        unsafe { std::slice::from_raw_parts(args, count) }
    };

    let mut decoded = [FormatArg::Int(0); MAX_RT_ARGS];
    for (slot, arg) in decoded.iter_mut().zip(raw) {
        // SAFETY: forwarded caller contract on string arguments.
        match unsafe { decode_arg(arg) } {
            Some(v) => *slot = v,
            None => return -1,
        }
    }

    // SAFETY: `fmt` is a non-null NUL-terminated string per the C contract.
    let fmt = unsafe { CStr::from_ptr(fmt) }.to_bytes();
    run(fmt, &decoded[..raw.len()])
}

fn clamp_count(n: usize) -> c_int {
    c_int::try_from(n).unwrap_or(c_int::MAX)
}

fn emit_through(putc: PutcFn, fmt: &[u8], args: &[FormatArg<'_>]) -> c_int {
    let mut sink = FnSink(|c: u8| putc(c as c_char));
    match Formatter::from_env().format(&mut sink, fmt, args) {
        Ok(n) => clamp_count(n),
        Err(_) => -1,
    }
}

/// Formats to the registered console callback.
///
/// Returns the number of bytes emitted, or -1 when no callback is installed,
/// an argument tag is unknown, or strict mode rejects the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_printf(fmt: *const c_char, args: *const RtArg, nargs: c_int) -> c_int {
    // Copied out so the callback never runs under the lock.
    let Some(putc) = *PUTC.read() else {
        return -1;
    };
    // SAFETY: forwarded caller contract.
    unsafe { with_decoded(fmt, args, nargs, |fmt, args| emit_through(putc, fmt, args)) }
}

/// Formats through an explicit `putc` callback.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_printf_to(
    putc: Option<PutcFn>,
    fmt: *const c_char,
    args: *const RtArg,
    nargs: c_int,
) -> c_int {
    let Some(putc) = putc else {
        return -1;
    };
    // SAFETY: forwarded caller contract.
    unsafe { with_decoded(fmt, args, nargs, |fmt, args| emit_through(putc, fmt, args)) }
}

/// Formats into `buf` with `snprintf` semantics.
///
/// Stores at most `size - 1` bytes plus a terminator and returns the length
/// the full rendering would have had. `buf` may be NULL when `size` is 0.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_snprintf(
    buf: *mut c_void,
    size: usize,
    fmt: *const c_char,
    args: *const RtArg,
    nargs: c_int,
) -> c_int {
    let out: &mut [u8] = if buf.is_null() || size == 0 {
        &mut []
    } else {
        // SAFETY: the caller guarantees `buf` is writable for `size` bytes.
        unsafe { std::slice::from_raw_parts_mut(buf.cast::<u8>(), size) }
    };
    // SAFETY: forwarded caller contract.
    unsafe {
        with_decoded(fmt, args, nargs, |fmt, args| {
            match Formatter::from_env().snprintf(out, fmt, args) {
                Ok(n) => clamp_count(n),
                Err(_) => -1,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snprintf_into(buf: &mut [u8], fmt: &CStr, args: &[RtArg]) -> c_int {
        unsafe {
            rt_snprintf(
                buf.as_mut_ptr().cast(),
                buf.len(),
                fmt.as_ptr(),
                args.as_ptr(),
                args.len() as c_int,
            )
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let bad = RtArg {
            tag: 99,
            value: RtArgValue { int: 1 },
        };
        let mut buf = [0u8; 8];
        assert_eq!(snprintf_into(&mut buf, c"%d", &[bad]), -1);
    }

    #[test]
    fn null_format_is_rejected() {
        let null_fmt = std::ptr::null();
        let n = unsafe { rt_snprintf(std::ptr::null_mut(), 0, null_fmt, std::ptr::null(), 0) };
        assert_eq!(n, -1);
    }

    #[test]
    fn null_string_argument_renders_placeholder() {
        let args = [RtArg::str(std::ptr::null())];
        let mut buf = [0u8; 16];
        assert_eq!(snprintf_into(&mut buf, c"[%s]", &args), 8);
        assert_eq!(&buf[..9], b"[(null)]\0");
    }

    #[test]
    fn size_zero_only_measures() {
        let args = [RtArg::int(12345)];
        let fmt = c"%d".as_ptr();
        let n = unsafe { rt_snprintf(std::ptr::null_mut(), 0, fmt, args.as_ptr(), 1) };
        assert_eq!(n, 5);
    }
}
