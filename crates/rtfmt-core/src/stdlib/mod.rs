//! Standard library utility functions.
//!
//! Implements the integer-to-text conversions (`itoa`, `utoa`) used by the
//! formatter and exported through the C ABI.

pub mod itoa;

pub use itoa::{ConversionError, Radix, digit_char, digit_value, itoa, itoa_len, itoa_radix, utoa};
