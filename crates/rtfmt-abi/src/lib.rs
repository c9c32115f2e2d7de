// All extern "C" exports accept raw pointers from C callers and validate what
// they can (null checks, bounded scans); per-function safety docs would repeat
// the same contract.
#![allow(clippy::missing_safety_doc)]
//! # rtfmt-abi
//!
//! extern "C" boundary for rtfmt.
//!
//! This crate produces a `cdylib` exposing the runtime's text routines to C
//! callers. Each entry point converts raw pointers into slices, delegates to
//! the safe implementation in `rtfmt-core`, and maps failures to C return
//! conventions (`-1`, empty string). Panics never cross the boundary.
//!
//! ```text
//! C caller -> ABI entry (this crate) -> rtfmt-core -> output primitive
//! ```
//!
//! C varargs are replaced by an array of tagged [`stdio_abi::RtArg`] values,
//! and the console is an explicitly registered `putc` callback.

pub mod stdio_abi;
pub mod stdlib_abi;
pub mod string_abi;

pub use stdio_abi::{
    PutcFn, RT_ARG_CHAR, RT_ARG_DOUBLE, RT_ARG_INT, RT_ARG_STR, RtArg, RtArgValue, rt_printf,
    rt_printf_to, rt_snprintf, rtfmt_set_putc,
};
pub use stdlib_abi::itoa;
pub use string_abi::reverse;
