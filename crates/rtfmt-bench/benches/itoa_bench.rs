//! Integer conversion benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rtfmt_core::stdio::ConversionBuffer;
use rtfmt_core::{Radix, itoa};

fn bench_itoa_bases(c: &mut Criterion) {
    let mut group = c.benchmark_group("itoa");
    for &base in &[2u32, 8, 10, 16, 36] {
        group.bench_with_input(BenchmarkId::new("i32_min", base), &base, |b, &base| {
            let mut buf = [0u8; 34];
            b.iter(|| {
                let text = itoa(black_box(i32::MIN), &mut buf, base).map(<[u8]>::len);
                black_box(text)
            });
        });
    }
    group.finish();
}

fn bench_conversion_buffer(c: &mut Criterion) {
    let values: Vec<i32> = (0..256).map(|i| i * 8_388_593 - 1_073_741_824).collect();
    c.bench_function("conversion_buffer_decimal_256", |b| {
        let mut buffer: ConversionBuffer = ConversionBuffer::new();
        b.iter(|| {
            let mut total = 0;
            for &v in &values {
                if let Ok(text) = buffer.render_signed(black_box(v), Radix::DECIMAL) {
                    total += text.len();
                }
            }
            black_box(total)
        });
    });
}

fn bench_abi_itoa(c: &mut Criterion) {
    c.bench_function("abi_itoa_decimal", |b| {
        let mut buf = [0 as std::ffi::c_char; 34];
        b.iter(|| {
            // SAFETY: 34 bytes hold any rendering.
            let p = unsafe { rtfmt_abi::itoa(black_box(-123_456_789), buf.as_mut_ptr(), 10) };
            black_box(p)
        });
    });
}

criterion_group!(
    benches,
    bench_itoa_bases,
    bench_conversion_buffer,
    bench_abi_itoa
);
criterion_main!(benches);
