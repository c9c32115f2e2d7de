//! ABI layer for the byte-string routines.

use std::ffi::{c_char, c_int};

/// C `reverse(str, length)`: reverses the first `length` bytes in place.
///
/// Null pointers and lengths below 2 are no-ops.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reverse(s: *mut c_char, length: c_int) {
    if s.is_null() || length < 2 {
        return;
    }
    let len = length as usize;
    // SAFETY: the caller guarantees `s` points to at least `length` bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(s.cast::<u8>(), len) };
    rtfmt_core::string::reverse(buf, len);
}
