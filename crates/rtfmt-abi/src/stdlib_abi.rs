//! ABI layer for the integer conversions.

use std::ffi::{c_char, c_int};

use rtfmt_core::stdlib::{Radix, itoa_len, itoa_radix};

/// C `itoa(value, str, base)`.
///
/// Writes the NUL-terminated text of `value` in `base` to `str` and returns
/// `str`. The caller must provide room for the rendering: at most 34 bytes
/// (base 2, negative). An invalid base yields the empty string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn itoa(value: c_int, s: *mut c_char, base: c_int) -> *mut c_char {
    if s.is_null() {
        return s;
    }
    let Some(radix) = u32::try_from(base).ok().and_then(Radix::new) else {
        // SAFETY: a non-null destination holds at least the terminator.
        unsafe { *s = 0 };
        return s;
    };

    let needed = itoa_len(value, radix);
    // SAFETY: the caller guarantees room for the rendering, which is exactly
    // `needed` bytes including the terminator.
    let buf = unsafe { std::slice::from_raw_parts_mut(s.cast::<u8>(), needed) };
    if itoa_radix(value, buf, radix).is_err() {
        buf[0] = 0;
    }
    s
}
