//! Byte-string operations.

pub mod mem;

pub use mem::{c_str_len, reverse};
