//! Benchmarks for the fractional delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use murmur_dsp::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        let mut delay = DelayLine::new();
        delay.resize(4_800);

        // Integer lag: interpolation degenerates to a single tap.
        group.bench_with_input(BenchmarkId::new("integer_lag", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    sum += delay.read(black_box(100.0));
                    delay.write(i as f32 * 0.01);
                }
                sum
            })
        });

        // Fractional lag: the interpolating path.
        group.bench_with_input(BenchmarkId::new("fractional_lag", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    sum += delay.read(black_box(100.37));
                    delay.write(i as f32 * 0.01);
                }
                sum
            })
        });
    }

    group.finish();
}
