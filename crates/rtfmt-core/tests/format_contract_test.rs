//! Integration test: formatter contract over the public API.
//!
//! Exercises reverse -> itoa -> printf together, the way an embedding
//! runtime wires them: a recording sink stands in for the console.
//!
//! Run: cargo test -p rtfmt-core --test format_contract_test

use rtfmt_core::stdio::{FnSink, FormatArg, FormatError, Formatter, OutputSink};
use rtfmt_core::{FormatMode, itoa, reverse, rtprintf, set_format_mode};

fn emitted(fmt: &[u8], args: &[FormatArg<'_>]) -> Vec<u8> {
    let mut chars = Vec::new();
    let mut sink = FnSink(|c: u8| chars.push(c));
    Formatter::legacy()
        .format(&mut sink, fmt, args)
        .expect("legacy formatting is infallible");
    chars
}

#[test]
fn documented_emission_sequences() {
    assert_eq!(emitted(b"%d", &[FormatArg::Int(42)]), vec![b'4', b'2']);
    assert_eq!(emitted(b"%x", &[FormatArg::Int(255)]), vec![b'f', b'f']);
    assert_eq!(emitted(b"%s", &[FormatArg::Str(b"hi")]), vec![b'h', b'i']);
    assert_eq!(emitted(b"%c", &[FormatArg::Char(b'A')]), vec![b'A']);
    assert_eq!(emitted(b"%q", &[]), vec![b'%', b'q']);
    assert_eq!(emitted(b"%100d", &[FormatArg::Int(5)]), vec![b'5']);
}

#[test]
fn itoa_output_survives_a_double_reverse() {
    let mut buf = [0u8; 34];
    for value in [0, 1, -1, 255, -42, i32::MAX, i32::MIN] {
        for base in [2, 8, 10, 16, 36] {
            let len = itoa(value, &mut buf, base).expect("valid").len();
            let before = buf;
            reverse(&mut buf, len);
            reverse(&mut buf, len);
            assert_eq!(buf, before);
        }
    }
}

#[test]
fn numeric_output_matches_itoa() {
    let mut buf = [0u8; 16];
    for value in [-2_000_000_000, -1, 0, 9, 10, 65_535, 1 << 30] {
        let mut out: Vec<u8> = Vec::new();
        Formatter::legacy()
            .format(&mut out, b"%d|%x", &[value.into(), value.into()])
            .unwrap();
        let mut expected = itoa(value, &mut buf, 10).unwrap().to_vec();
        expected.push(b'|');
        expected.extend_from_slice(itoa(value, &mut buf, 16).unwrap());
        assert_eq!(out, expected, "value {value}");
    }
}

#[test]
fn dyn_sink_and_macro_share_the_global_mode() {
    set_format_mode(FormatMode::Strict);
    let mut out: Vec<u8> = Vec::new();
    let sink: &mut dyn OutputSink = &mut out;
    let n = rtprintf!(sink, "%u%%", -1).unwrap();
    assert_eq!(n, 11);
    assert_eq!(out, b"4294967295%");

    let mut out: Vec<u8> = Vec::new();
    assert_eq!(
        rtprintf!(&mut out, "%d"),
        Err(FormatError::MissingArgument {
            index: 0,
            conversion: 'd'
        })
    );

    set_format_mode(FormatMode::Legacy);
    let mut out: Vec<u8> = Vec::new();
    rtprintf!(&mut out, b"%u%%", -1).unwrap();
    assert_eq!(out, b"-1%%");
}
