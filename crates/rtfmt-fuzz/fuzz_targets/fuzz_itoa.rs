#![no_main]
use libfuzzer_sys::fuzz_target;
use rtfmt_core::stdlib::{Radix, digit_value, itoa, itoa_len};

fuzz_target!(|input: (i32, u8)| {
    let (value, raw_base) = input;
    let base = u32::from(raw_base);
    let mut buf = [0x55u8; 34];

    let Some(radix) = Radix::new(base) else {
        assert!(itoa(value, &mut buf, base).is_err());
        assert_eq!(buf, [0x55u8; 34]);
        return;
    };

    let text = itoa(value, &mut buf, base).expect("34 bytes fit any rendering");
    let len = text.len();
    assert_eq!(text.len() + 1, itoa_len(value, radix));
    assert_eq!(text.first() == Some(&b'-'), value < 0);

    let digits = if value < 0 { &text[1..] } else { text };
    assert!(digits.len() == 1 || digits[0] != b'0', "no leading zeros");
    let mut magnitude: u64 = 0;
    for &c in digits {
        let d = digit_value(c).expect("digit");
        assert!(d < base);
        assert!(!c.is_ascii_uppercase());
        magnitude = magnitude * u64::from(base) + u64::from(d);
    }
    assert_eq!(magnitude, u64::from(value.unsigned_abs()));
    assert_eq!(buf[len], 0);
});
