//! Standard output formatting.
//!
//! Implements the runtime's `printf` family over an injected single-byte
//! output primitive, plus the bounded `snprintf` variant.

pub mod buffer;
pub mod printf;
pub mod sink;

pub use buffer::{CONVERSION_BUFFER_LEN, ConversionBuffer};
pub use printf::{
    Conversion, Directive, FormatArg, FormatError, FormatSegment, FormatSegments, FormatSpec,
    Formatter, count_format_args, parse_format_spec, parse_format_string, printf, snprintf,
};
pub use sink::{CountingSink, FnSink, OutputSink, SliceSink};
