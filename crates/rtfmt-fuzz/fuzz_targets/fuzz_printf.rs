#![no_main]
use libfuzzer_sys::fuzz_target;
use rtfmt_core::stdio::{FormatArg, Formatter, count_format_args};

// Input layout: one selector byte for the argument pattern, then the format.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, fmt)) = data.split_first() else {
        return;
    };

    let pool = [
        FormatArg::Int(i32::MIN),
        FormatArg::Char(b'z'),
        FormatArg::Str(b"fuzz\0tail"),
        FormatArg::Double(f64::NAN),
        FormatArg::Int(-1),
        FormatArg::Double(1.0e300),
        FormatArg::Str(b""),
        FormatArg::Int(i32::MAX),
    ];
    let wanted = count_format_args(fmt);
    let args: Vec<FormatArg<'_>> = (0..wanted)
        .map(|i| pool[(usize::from(selector) + i * 3) % pool.len()])
        .collect();

    // Legacy mode never fails.
    let mut legacy: Vec<u8> = Vec::new();
    let n = Formatter::legacy()
        .format(&mut legacy, fmt, &args)
        .expect("legacy formatting is infallible");
    assert_eq!(n, legacy.len());

    // snprintf must agree with the unbounded rendering on its prefix.
    let cap = usize::from(selector % 16);
    let mut buf = vec![0xAAu8; cap];
    let total = Formatter::legacy()
        .snprintf(&mut buf, fmt, &args)
        .expect("legacy formatting is infallible");
    assert_eq!(total, legacy.len());
    if cap > 0 {
        let stored = total.min(cap - 1);
        assert_eq!(&buf[..stored], &legacy[..stored]);
        assert_eq!(buf[stored], 0);
    }

    // Without %u, %x or %% the modes only differ where strict stops: its
    // output is the legacy rendering or a prefix of it.
    let mut strict: Vec<u8> = Vec::new();
    let strict_result = Formatter::strict().format(&mut strict, fmt, &args);
    if let Ok(m) = strict_result {
        assert_eq!(m, strict.len());
    }
    let modes_agree = !fmt.iter().any(|&b| b == b'u' || b == b'x')
        && !fmt.windows(2).any(|w| w == b"%%");
    if modes_agree {
        assert!(legacy.starts_with(&strict));
        if strict_result.is_ok() {
            assert_eq!(strict, legacy);
        }
    }
});
