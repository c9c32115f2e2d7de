//! Integer to ASCII conversion (`itoa`, `utoa`).
//!
//! Digits are produced least-significant first into the front of the caller's
//! buffer, the sign is pushed last, and the run is then reversed in place so
//! the result reads most-significant first. Every rendering is NUL-terminated.
//!
//! The magnitude is taken as `u32`, so `i32::MIN` renders as `-2147483648`
//! instead of overflowing on negation.

use thiserror::Error;

use crate::string::reverse;

/// Errors reported by the integer conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("base {0} is outside 2..=36")]
    InvalidBase(u32),
    #[error("conversion needs {needed} bytes but the buffer holds {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

/// A validated numeric base in `2..=36`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radix(u32);

impl Radix {
    pub const BINARY: Self = Self(2);
    pub const OCTAL: Self = Self(8);
    pub const DECIMAL: Self = Self(10);
    pub const HEX: Self = Self(16);

    pub const MIN: u32 = 2;
    pub const MAX: u32 = 36;

    /// Returns `None` for bases outside `2..=36`.
    #[must_use]
    pub const fn new(base: u32) -> Option<Self> {
        if base >= Self::MIN && base <= Self::MAX {
            Some(Self(base))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Worst-case rendered size of any 32-bit value in this base, counting
    /// the sign and the NUL terminator.
    #[must_use]
    pub const fn max_rendered_len(self) -> usize {
        let mut digits = 0;
        let mut v = u32::MAX;
        while v != 0 {
            v /= self.0;
            digits += 1;
        }
        digits + 2
    }
}

impl TryFrom<u32> for Radix {
    type Error = ConversionError;

    fn try_from(base: u32) -> Result<Self, Self::Error> {
        Self::new(base).ok_or(ConversionError::InvalidBase(base))
    }
}

/// Maps a digit value to its character: `0-9`, then lowercase `a-z`.
#[must_use]
pub const fn digit_char(digit: u32) -> u8 {
    if digit < 10 {
        b'0' + digit as u8
    } else {
        b'a' + (digit - 10) as u8
    }
}

/// Inverse of [`digit_char`], accepting either letter case.
#[must_use]
pub const fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'a'..=b'z' => Some((c - b'a') as u32 + 10),
        b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
        _ => None,
    }
}

/// Converts `value` to text in `base`, writing into `buf`.
///
/// Equivalent to the C runtime's `itoa(value, str, base)`: the text starts at
/// `buf[0]` and is NUL-terminated. Returns the rendered bytes (terminator
/// excluded) as a view into the same buffer.
///
/// Nothing is written when the base is invalid or the buffer cannot hold the
/// sign, digits and terminator.
pub fn itoa(value: i32, buf: &mut [u8], base: u32) -> Result<&[u8], ConversionError> {
    itoa_radix(value, buf, Radix::try_from(base)?)
}

/// [`itoa`] with an already-validated [`Radix`].
pub fn itoa_radix(value: i32, buf: &mut [u8], radix: Radix) -> Result<&[u8], ConversionError> {
    let len = render_magnitude(value.unsigned_abs(), value < 0, buf, radix)?;
    Ok(&buf[..len])
}

/// Unsigned counterpart of [`itoa`].
pub fn utoa(value: u32, buf: &mut [u8], base: u32) -> Result<&[u8], ConversionError> {
    let radix = Radix::try_from(base)?;
    let len = render_magnitude(value, false, buf, radix)?;
    Ok(&buf[..len])
}

/// Bytes `value` needs in `radix`, sign and NUL terminator included.
#[must_use]
pub fn itoa_len(value: i32, radix: Radix) -> usize {
    rendered_len(value.unsigned_abs(), value < 0, radix) + 1
}

/// Number of bytes (without terminator) that `magnitude` renders to.
fn rendered_len(mut magnitude: u32, negative: bool, radix: Radix) -> usize {
    let mut len = usize::from(negative);
    loop {
        len += 1;
        magnitude /= radix.get();
        if magnitude == 0 {
            return len;
        }
    }
}

pub(crate) fn render_magnitude(
    mut magnitude: u32,
    negative: bool,
    buf: &mut [u8],
    radix: Radix,
) -> Result<usize, ConversionError> {
    let needed = rendered_len(magnitude, negative, radix) + 1;
    if buf.len() < needed {
        return Err(ConversionError::BufferTooSmall {
            needed,
            capacity: buf.len(),
        });
    }

    if magnitude == 0 {
        buf[0] = b'0';
        buf[1] = 0;
        return Ok(1);
    }

    let base = radix.get();
    let mut i = 0;
    while magnitude != 0 {
        buf[i] = digit_char(magnitude % base);
        i += 1;
        magnitude /= base;
    }
    if negative {
        buf[i] = b'-';
        i += 1;
    }
    buf[i] = 0;
    reverse(buf, i);
    Ok(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_back(text: &[u8], base: u32) -> u64 {
        let mut acc = 0u64;
        for &c in text.iter().filter(|&&c| c != b'-') {
            acc = acc * u64::from(base) + u64::from(digit_value(c).expect("digit"));
        }
        acc
    }

    #[test]
    fn zero_in_every_base() {
        for base in Radix::MIN..=Radix::MAX {
            let mut buf = [0xAAu8; 4];
            assert_eq!(itoa(0, &mut buf, base).unwrap(), b"0", "base {base}");
            assert_eq!(buf[1], 0);
        }
    }

    #[test]
    fn known_renderings() {
        let mut buf = [0u8; 40];
        assert_eq!(itoa(255, &mut buf, 16).unwrap(), b"ff");
        assert_eq!(itoa(255, &mut buf, 2).unwrap(), b"11111111");
        assert_eq!(itoa(-42, &mut buf, 10).unwrap(), b"-42");
        assert_eq!(itoa(35, &mut buf, 36).unwrap(), b"z");
        assert_eq!(itoa(-36, &mut buf, 36).unwrap(), b"-10");
        assert_eq!(itoa(8, &mut buf, 8).unwrap(), b"10");
    }

    #[test]
    fn result_is_nul_terminated() {
        let mut buf = [0xFFu8; 8];
        let len = itoa(-7, &mut buf, 10).unwrap().len();
        assert_eq!(len, 2);
        assert_eq!(&buf[..3], b"-7\0");
    }

    #[test]
    fn extremes_render_without_overflow() {
        let mut buf = [0u8; 40];
        assert_eq!(itoa(i32::MIN, &mut buf, 10).unwrap(), b"-2147483648");
        assert_eq!(itoa(i32::MAX, &mut buf, 10).unwrap(), b"2147483647");
        assert_eq!(itoa(i32::MIN, &mut buf, 16).unwrap(), b"-80000000");
        assert_eq!(
            itoa(i32::MIN, &mut buf, 2).unwrap(),
            b"-10000000000000000000000000000000"
        );
        assert_eq!(utoa(u32::MAX, &mut buf, 16).unwrap(), b"ffffffff");
        assert_eq!(utoa(u32::MAX, &mut buf, 10).unwrap(), b"4294967295");
    }

    #[test]
    fn round_trip_recovers_magnitude() {
        let samples = [
            1, -1, 7, -9, 10, 255, -4096, 65_535, 1_000_000, i32::MAX, i32::MIN,
        ];
        let mut buf = [0u8; 40];
        for base in Radix::MIN..=Radix::MAX {
            for &v in &samples {
                let text = itoa(v, &mut buf, base).unwrap();
                assert_eq!(text.first() == Some(&b'-'), v < 0);
                assert_eq!(
                    parse_back(text, base),
                    u64::from(v.unsigned_abs()),
                    "v={v} base={base}"
                );
            }
        }
    }

    #[test]
    fn invalid_base_is_rejected() {
        let mut buf = [0x55u8; 8];
        assert_eq!(itoa(5, &mut buf, 0), Err(ConversionError::InvalidBase(0)));
        assert_eq!(itoa(5, &mut buf, 1), Err(ConversionError::InvalidBase(1)));
        assert_eq!(itoa(5, &mut buf, 37), Err(ConversionError::InvalidBase(37)));
        assert_eq!(buf, [0x55u8; 8]);
    }

    #[test]
    fn short_buffer_is_rejected_untouched() {
        let mut buf = [0x55u8; 3];
        assert_eq!(
            itoa(-42, &mut buf, 10),
            Err(ConversionError::BufferTooSmall {
                needed: 4,
                capacity: 3
            })
        );
        assert_eq!(buf, [0x55u8; 3]);

        let mut exact = [0u8; 4];
        assert_eq!(itoa(-42, &mut exact, 10).unwrap(), b"-42");
    }

    #[test]
    fn max_rendered_len_covers_extremes() {
        assert_eq!(Radix::BINARY.max_rendered_len(), 34);
        assert_eq!(Radix::DECIMAL.max_rendered_len(), 12);
        assert_eq!(Radix::HEX.max_rendered_len(), 10);
        for base in Radix::MIN..=Radix::MAX {
            let radix = Radix::new(base).unwrap();
            let mut buf = vec![0u8; radix.max_rendered_len()];
            assert!(itoa(i32::MIN, &mut buf, base).is_ok(), "base {base}");
            assert!(utoa(u32::MAX, &mut buf, base).is_ok(), "base {base}");
        }
    }

    #[test]
    fn itoa_len_matches_rendering() {
        let mut buf = [0u8; 40];
        for &(v, base) in &[(0, 10), (-1, 10), (255, 16), (i32::MIN, 2), (i32::MAX, 36)] {
            let radix = Radix::new(base).unwrap();
            let len = itoa(v, &mut buf, base).unwrap().len();
            assert_eq!(itoa_len(v, radix), len + 1);
        }
    }

    #[test]
    fn digit_mapping_is_lowercase() {
        assert_eq!(digit_char(9), b'9');
        assert_eq!(digit_char(10), b'a');
        assert_eq!(digit_char(35), b'z');
        assert_eq!(digit_value(b'F'), Some(15));
        assert_eq!(digit_value(b'-'), None);
    }
}
