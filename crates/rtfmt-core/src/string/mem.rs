//! In-place byte-buffer operations used by the conversion routines.
//!
//! These are safe Rust implementations operating on byte slices. Lengths
//! larger than the slice are clamped to the slice length.

/// Reverses the first `length` bytes of `buf` in place.
///
/// Two-pointer swap from both ends toward the middle. A `length` of 0 or 1
/// leaves the buffer untouched. Only `min(length, buf.len())` bytes take part.
pub fn reverse(buf: &mut [u8], length: usize) {
    let length = length.min(buf.len());
    if length < 2 {
        return;
    }
    let mut start = 0;
    let mut end = length - 1;
    while start < end {
        buf.swap(start, end);
        start += 1;
        end -= 1;
    }
}

/// Length of a C-style string stored in `s`: bytes up to the first NUL, or
/// the whole slice when it carries no terminator.
#[must_use]
pub fn c_str_len(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_even_length() {
        let mut buf = *b"abcd";
        reverse(&mut buf, 4);
        assert_eq!(&buf, b"dcba");
    }

    #[test]
    fn reverse_odd_length_keeps_middle() {
        let mut buf = *b"abcde";
        reverse(&mut buf, 5);
        assert_eq!(&buf, b"edcba");
    }

    #[test]
    fn reverse_prefix_only() {
        let mut buf = *b"12345";
        reverse(&mut buf, 3);
        assert_eq!(&buf, b"32145");
    }

    #[test]
    fn reverse_short_lengths_are_noops() {
        let mut buf = *b"xy";
        reverse(&mut buf, 0);
        assert_eq!(&buf, b"xy");
        reverse(&mut buf, 1);
        assert_eq!(&buf, b"xy");

        let mut empty: [u8; 0] = [];
        reverse(&mut empty, 0);
    }

    #[test]
    fn reverse_clamps_oversized_length() {
        let mut buf = *b"abc";
        reverse(&mut buf, 64);
        assert_eq!(&buf, b"cba");
    }

    #[test]
    fn reverse_twice_is_identity() {
        let original: Vec<u8> = (0..=255u8).collect();
        for n in 0..original.len() {
            let mut buf = original.clone();
            reverse(&mut buf, n);
            reverse(&mut buf, n);
            assert_eq!(buf, original, "length {n}");
        }
    }

    #[test]
    fn c_str_len_stops_at_nul() {
        assert_eq!(c_str_len(b"hi\0there"), 2);
        assert_eq!(c_str_len(b"hi"), 2);
        assert_eq!(c_str_len(b"\0"), 0);
        assert_eq!(c_str_len(b""), 0);
    }
}
