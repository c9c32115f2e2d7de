//! # rtfmt-core
//!
//! Safe Rust implementations of the freestanding runtime's text routines:
//! in-place string reversal, `itoa`-style integer conversion and a small
//! `printf`-style formatter that emits one byte at a time through an
//! injected output primitive.
//!
//! The formatting path never allocates. No `unsafe` code is permitted at the
//! crate level.

#![deny(unsafe_code)]

pub mod config;
pub mod stdio;
pub mod stdlib;
pub mod string;

pub use config::{FormatMode, format_mode, set_format_mode};
pub use stdio::{FormatArg, FormatError, Formatter, OutputSink, printf, snprintf};
pub use stdlib::{ConversionError, Radix, itoa, utoa};
pub use string::reverse;
