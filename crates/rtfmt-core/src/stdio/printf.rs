//! printf formatting engine.
//!
//! Interprets the runtime's small directive language and streams the result
//! through an [`OutputSink`] one byte at a time. The supported surface is
//! `%d %u %x %c %s`, plus `%f` on 64-bit targets. Width digits and `l` length
//! modifiers are accepted and discarded; no padding is ever applied.
//!
//! Design invariant: the formatting path does not allocate. Numeric
//! specifiers render into a single [`ConversionBuffer`] reused for the whole
//! call, and its capacity is checked at compile time for every radix used
//! here.

use thiserror::Error;

use crate::config::{FormatMode, format_mode};
use crate::stdlib::itoa::{ConversionError, Radix};
use crate::string::c_str_len;

use super::buffer::{CONVERSION_BUFFER_LEN, ConversionBuffer};
use super::sink::{CountingSink, OutputSink, SliceSink};

const _: () = assert!(
    ConversionBuffer::<CONVERSION_BUFFER_LEN>::fits(Radix::DECIMAL)
        && ConversionBuffer::<CONVERSION_BUFFER_LEN>::fits(Radix::HEX),
    "conversion buffer too small for the formatter's radixes"
);

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Typed argument value, consumed positionally by conversion specifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    Int(i32),
    Char(u8),
    /// Byte string; rendering stops at the first NUL if one is present.
    Str(&'a [u8]),
    Double(f64),
}

impl FormatArg<'_> {
    /// Short name of the variant, used in error reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Char(_) => "char",
            Self::Str(_) => "str",
            Self::Double(_) => "double",
        }
    }

    /// An `unsigned` argument, bit-reinterpreted as a C caller passing it
    /// through varargs would.
    #[must_use]
    pub const fn unsigned(v: u32) -> Self {
        Self::Int(v as i32)
    }

    /// Integer view with C promotion rules: characters widen to `int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(v) => Some(v),
            Self::Char(c) => Some(c as i32),
            _ => None,
        }
    }

    /// Character view: integers are truncated to their low byte.
    #[must_use]
    pub const fn as_char(&self) -> Option<u8> {
        match *self {
            Self::Char(c) => Some(c),
            Self::Int(v) => Some(v as u8),
            _ => None,
        }
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

/// Truncated to the low byte of the scalar value; meant for ASCII.
impl From<char> for FormatArg<'_> {
    fn from(c: char) -> Self {
        Self::Char(c as u8)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Self::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FormatArg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

/// Conversion selected by the specifier byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// `%d`
    Signed,
    /// `%u`
    Unsigned,
    /// `%x`
    Hex,
    /// `%c`
    Char,
    /// `%s`
    Str,
    /// `%f`, integer part only.
    #[cfg(target_pointer_width = "64")]
    Float,
}

impl Conversion {
    #[must_use]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'd' => Some(Self::Signed),
            b'u' => Some(Self::Unsigned),
            b'x' => Some(Self::Hex),
            b'c' => Some(Self::Char),
            b's' => Some(Self::Str),
            #[cfg(target_pointer_width = "64")]
            b'f' => Some(Self::Float),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Signed => b'd',
            Self::Unsigned => b'u',
            Self::Hex => b'x',
            Self::Char => b'c',
            Self::Str => b's',
            #[cfg(target_pointer_width = "64")]
            Self::Float => b'f',
        }
    }
}

/// A parsed conversion specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// Width digits as written. Parsed for diagnostics, never applied.
    pub width: Option<usize>,
    /// Number of `l` modifiers. All integers are read at one width regardless.
    pub long_count: usize,
    pub conversion: Conversion,
}

/// Outcome of parsing the bytes after a `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Spec(FormatSpec),
    /// The byte ending the directive is not a known conversion.
    Unrecognized(u8),
    /// The format string ended before a conversion byte.
    Incomplete,
}

/// Parse one directive. `fmt` starts at the first byte AFTER `%`.
///
/// Returns the directive and the number of bytes consumed from `fmt`,
/// including the conversion (or unrecognized) byte.
#[must_use]
pub fn parse_format_spec(fmt: &[u8]) -> (Directive, usize) {
    let len = fmt.len();
    let mut pos = 0;

    // --- width ---
    let start = pos;
    while pos < len && fmt[pos].is_ascii_digit() {
        pos += 1;
    }
    let width = (pos > start).then(|| parse_decimal(&fmt[start..pos]));

    // --- length modifiers ---
    let mut long_count = 0;
    while pos < len && fmt[pos] == b'l' {
        pos += 1;
        long_count += 1;
    }

    // --- conversion ---
    if pos >= len {
        return (Directive::Incomplete, pos);
    }
    let byte = fmt[pos];
    pos += 1;
    match Conversion::from_byte(byte) {
        Some(conversion) => (
            Directive::Spec(FormatSpec {
                width,
                long_count,
                conversion,
            }),
            pos,
        ),
        None => (Directive::Unrecognized(byte), pos),
    }
}

/// A piece of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Literal bytes to emit verbatim.
    Literal(&'a [u8]),
    /// A conversion specifier requiring an argument.
    Spec(FormatSpec),
    /// `%` followed by an unknown byte (including a second `%`).
    Unrecognized(u8),
    /// A `%` with nothing after it.
    TrailingPercent,
}

/// Non-allocating iterator over the segments of a format string.
#[derive(Debug, Clone)]
pub struct FormatSegments<'a> {
    fmt: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for FormatSegments<'a> {
    type Item = FormatSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let fmt = self.fmt;
        let len = fmt.len();
        if self.pos >= len {
            return None;
        }

        if fmt[self.pos] != b'%' {
            let start = self.pos;
            while self.pos < len && fmt[self.pos] != b'%' {
                self.pos += 1;
            }
            return Some(FormatSegment::Literal(&fmt[start..self.pos]));
        }

        // Skip the '%'.
        self.pos += 1;
        let (directive, consumed) = parse_format_spec(&fmt[self.pos..]);
        self.pos += consumed;
        Some(match directive {
            Directive::Spec(spec) => FormatSegment::Spec(spec),
            Directive::Unrecognized(b) => FormatSegment::Unrecognized(b),
            Directive::Incomplete => FormatSegment::TrailingPercent,
        })
    }
}

/// Iterate over the segments of `fmt`, which ends at its first NUL byte or at
/// the end of the slice.
#[must_use]
pub fn parse_format_string(fmt: &[u8]) -> FormatSegments<'_> {
    FormatSegments {
        fmt: &fmt[..c_str_len(fmt)],
        pos: 0,
    }
}

/// Number of arguments `fmt` consumes.
#[must_use]
pub fn count_format_args(fmt: &[u8]) -> usize {
    parse_format_string(fmt)
        .filter(|seg| matches!(seg, FormatSegment::Spec(_)))
        .count()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Misuse reported in strict mode. Legacy mode degrades the output instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("argument {index} missing for %{conversion}")]
    MissingArgument { index: usize, conversion: char },
    #[error("argument {index} is {found}, which %{conversion} cannot render")]
    ArgumentMismatch {
        index: usize,
        conversion: char,
        found: &'static str,
    },
    #[error("format string ends with a lone '%'")]
    TrailingPercent,
    #[error("argument {index} is not a finite value within the 32-bit integer range")]
    FloatOutOfRange { index: usize },
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// The formatter, bound to an explicit [`FormatMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    mode: FormatMode,
}

impl Formatter {
    #[must_use]
    pub const fn new(mode: FormatMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn legacy() -> Self {
        Self::new(FormatMode::Legacy)
    }

    #[must_use]
    pub const fn strict() -> Self {
        Self::new(FormatMode::Strict)
    }

    /// Formatter using the process-wide mode.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(format_mode())
    }

    #[must_use]
    pub const fn mode(&self) -> FormatMode {
        self.mode
    }

    /// Render `fmt` with `args` into `sink`.
    ///
    /// Returns the number of bytes emitted. In legacy mode this never fails.
    /// In strict mode the first misuse stops formatting; bytes already emitted
    /// stay emitted.
    pub fn format<S: OutputSink + ?Sized>(
        &self,
        sink: &mut S,
        fmt: &[u8],
        args: &[FormatArg<'_>],
    ) -> Result<usize, FormatError> {
        let mut out = CountingSink::new(sink);
        let mut buffer: ConversionBuffer = ConversionBuffer::new();
        let mut next_arg = 0;

        for segment in parse_format_string(fmt) {
            match segment {
                FormatSegment::Literal(bytes) => out.put_bytes(bytes),
                FormatSegment::Spec(spec) => {
                    let index = next_arg;
                    next_arg += 1;
                    self.render_spec(&mut out, &mut buffer, spec, index, args.get(index))?;
                }
                FormatSegment::Unrecognized(b'%') if self.mode.reports_errors() => {
                    out.put_char(b'%');
                }
                FormatSegment::Unrecognized(b) => {
                    out.put_char(b'%');
                    out.put_char(b);
                }
                FormatSegment::TrailingPercent => {
                    if self.mode.reports_errors() {
                        return Err(FormatError::TrailingPercent);
                    }
                    out.put_char(b'%');
                }
            }
        }
        Ok(out.count())
    }

    /// Render into `buf` with `snprintf` semantics.
    ///
    /// At most `buf.len() - 1` bytes are stored and the result is always
    /// NUL-terminated when `buf` is non-empty. Returns the length the full
    /// rendering would have had.
    pub fn snprintf(
        &self,
        buf: &mut [u8],
        fmt: &[u8],
        args: &[FormatArg<'_>],
    ) -> Result<usize, FormatError> {
        let mut sink = SliceSink::new(buf);
        let result = self.format(&mut sink, fmt, args);
        let total = sink.finish();
        result.map(|_| total)
    }

    fn render_spec<S: OutputSink + ?Sized>(
        &self,
        out: &mut S,
        buffer: &mut ConversionBuffer,
        spec: FormatSpec,
        index: usize,
        arg: Option<&FormatArg<'_>>,
    ) -> Result<(), FormatError> {
        let conversion = char::from(spec.conversion.as_byte());
        let Some(arg) = arg else {
            return self.degrade(FormatError::MissingArgument { index, conversion });
        };
        let mismatch = FormatError::ArgumentMismatch {
            index,
            conversion,
            found: arg.kind(),
        };
        let strict = self.mode.reports_errors();

        match spec.conversion {
            Conversion::Signed => match arg.as_int() {
                Some(v) => out.put_bytes(buffer.render_signed(v, Radix::DECIMAL)?),
                None => return self.degrade(mismatch),
            },
            Conversion::Unsigned => match arg.as_int() {
                Some(v) if strict => {
                    out.put_bytes(buffer.render_unsigned(v as u32, Radix::DECIMAL)?);
                }
                // Legacy: rendered through the signed path, sign included.
                Some(v) => out.put_bytes(buffer.render_signed(v, Radix::DECIMAL)?),
                None => return self.degrade(mismatch),
            },
            Conversion::Hex => match arg.as_int() {
                Some(v) if strict => {
                    out.put_bytes(buffer.render_unsigned(v as u32, Radix::HEX)?);
                }
                Some(v) => out.put_bytes(buffer.render_signed(v, Radix::HEX)?),
                None => return self.degrade(mismatch),
            },
            Conversion::Char => match arg.as_char() {
                Some(c) => out.put_char(c),
                None => return self.degrade(mismatch),
            },
            Conversion::Str => match *arg {
                FormatArg::Str(s) => out.put_bytes(&s[..c_str_len(s)]),
                _ => return self.degrade(mismatch),
            },
            #[cfg(target_pointer_width = "64")]
            Conversion::Float => match *arg {
                FormatArg::Double(real) => {
                    let whole = if strict {
                        float_integer_part(real).ok_or(FormatError::FloatOutOfRange { index })?
                    } else {
                        real as i32
                    };
                    out.put_bytes(buffer.render_signed(whole, Radix::DECIMAL)?);
                }
                _ => return self.degrade(mismatch),
            },
        }
        Ok(())
    }

    fn degrade(&self, err: FormatError) -> Result<(), FormatError> {
        if self.mode.reports_errors() {
            Err(err)
        } else {
            Ok(())
        }
    }
}

/// Render `fmt` with `args` into `sink` under the process-wide mode.
pub fn printf<S: OutputSink + ?Sized>(
    sink: &mut S,
    fmt: &[u8],
    args: &[FormatArg<'_>],
) -> Result<usize, FormatError> {
    Formatter::from_env().format(sink, fmt, args)
}

/// `snprintf` under the process-wide mode. See [`Formatter::snprintf`].
pub fn snprintf(buf: &mut [u8], fmt: &[u8], args: &[FormatArg<'_>]) -> Result<usize, FormatError> {
    Formatter::from_env().snprintf(buf, fmt, args)
}

#[doc(hidden)]
pub fn format_bytes<T: AsRef<[u8]> + ?Sized>(fmt: &T) -> &[u8] {
    fmt.as_ref()
}

/// `printf`-style call with arguments converted through [`FormatArg::from`].
///
/// ```
/// let mut out: Vec<u8> = Vec::new();
/// rtfmt_core::rtprintf!(&mut out, "%s=%d", "answer", 42).unwrap();
/// assert_eq!(out, b"answer=42");
/// ```
#[macro_export]
macro_rules! rtprintf {
    ($sink:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::stdio::printf(
            $sink,
            $crate::stdio::printf::format_bytes($fmt),
            &[$($crate::stdio::FormatArg::from($arg)),*],
        )
    };
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_decimal(digits: &[u8]) -> usize {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add((d - b'0') as usize);
    }
    result
}

/// Integer part of `real`, or `None` when it is not finite or does not fit
/// in an `i32`.
#[cfg(target_pointer_width = "64")]
fn float_integer_part(real: f64) -> Option<i32> {
    let whole = real.trunc();
    if whole.is_finite() && whole >= f64::from(i32::MIN) && whole <= f64::from(i32::MAX) {
        Some(whole as i32)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
