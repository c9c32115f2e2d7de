//! Fixed-capacity conversion buffer.
//!
//! One buffer lives on the stack for the duration of a formatting call and is
//! overwritten by every numeric specifier. Its capacity is a const parameter
//! so callers can assert at compile time that the radixes they use fit.

use crate::stdlib::itoa::{ConversionError, Radix, render_magnitude};

/// Capacity used by the formatter: enough for sign, ten decimal digits and
/// the terminator.
pub const CONVERSION_BUFFER_LEN: usize = 20;

/// Scratch storage for rendering one integer.
#[derive(Debug, Clone)]
pub struct ConversionBuffer<const N: usize = CONVERSION_BUFFER_LEN> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> ConversionBuffer<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// True when every 32-bit value in `radix` fits with sign and terminator.
    #[must_use]
    pub const fn fits(radix: Radix) -> bool {
        N >= radix.max_rendered_len()
    }

    /// Render a signed value, replacing the previous contents.
    pub fn render_signed(&mut self, value: i32, radix: Radix) -> Result<&[u8], ConversionError> {
        self.clear();
        self.len = render_magnitude(value.unsigned_abs(), value < 0, &mut self.bytes, radix)?;
        Ok(self.as_bytes())
    }

    /// Render an unsigned value, replacing the previous contents.
    pub fn render_unsigned(&mut self, value: u32, radix: Radix) -> Result<&[u8], ConversionError> {
        self.clear();
        self.len = render_magnitude(value, false, &mut self.bytes, radix)?;
        Ok(self.as_bytes())
    }

    /// Empty the buffer so a failed render leaves `""` behind.
    fn clear(&mut self) {
        self.len = 0;
        if let Some(first) = self.bytes.first_mut() {
            *first = 0;
        }
    }

    /// The last rendering, terminator excluded.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The last rendering including its NUL terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if N == 0 {
            return &[];
        }
        &self.bytes[..(self.len + 1).min(N)]
    }
}

impl<const N: usize> Default for ConversionBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_fits_formatter_radixes() {
        assert!(ConversionBuffer::<CONVERSION_BUFFER_LEN>::fits(Radix::DECIMAL));
        assert!(ConversionBuffer::<CONVERSION_BUFFER_LEN>::fits(Radix::HEX));
        assert!(!ConversionBuffer::<CONVERSION_BUFFER_LEN>::fits(Radix::BINARY));
        assert!(ConversionBuffer::<34>::fits(Radix::BINARY));
    }

    #[test]
    fn renderings_overwrite_each_other() {
        let mut buf: ConversionBuffer = ConversionBuffer::new();
        assert_eq!(buf.capacity(), 20);
        assert_eq!(buf.render_signed(-123_456, Radix::DECIMAL).unwrap(), b"-123456");
        assert_eq!(buf.render_signed(7, Radix::DECIMAL).unwrap(), b"7");
        assert_eq!(buf.as_bytes_with_nul(), b"7\0");
        assert_eq!(buf.render_unsigned(u32::MAX, Radix::HEX).unwrap(), b"ffffffff");
    }

    #[test]
    fn binary_overflows_default_capacity_without_writing() {
        let mut buf: ConversionBuffer = ConversionBuffer::new();
        buf.render_signed(5, Radix::DECIMAL).unwrap();
        let err = buf.render_signed(i32::MIN, Radix::BINARY).unwrap_err();
        assert_eq!(
            err,
            ConversionError::BufferTooSmall {
                needed: 34,
                capacity: 20
            }
        );
        assert_eq!(buf.as_bytes(), b"");
    }

    #[test]
    fn failed_render_leaves_empty_terminated_string() {
        let mut buf: ConversionBuffer = ConversionBuffer::new();
        assert_eq!(buf.render_signed(7, Radix::DECIMAL).unwrap(), b"7");
        assert!(buf.render_signed(i32::MIN, Radix::BINARY).is_err());
        assert_eq!(buf.as_bytes(), b"");
        assert_eq!(buf.as_bytes_with_nul(), b"\0");

        assert_eq!(buf.render_unsigned(42, Radix::HEX).unwrap(), b"2a");
        assert!(buf.render_unsigned(u32::MAX, Radix::BINARY).is_err());
        assert_eq!(buf.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn zero_capacity_buffer_has_no_terminator() {
        let mut buf = ConversionBuffer::<0>::new();
        assert!(buf.render_signed(1, Radix::DECIMAL).is_err());
        assert_eq!(buf.as_bytes_with_nul(), b"");
    }
}
