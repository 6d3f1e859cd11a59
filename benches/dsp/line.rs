//! Benchmarks for the line and attack/decay generators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use murmur_dsp::clock::SampleClock;
use murmur_dsp::dsp::line::{AttackDecay, Line};

use crate::BLOCK_SIZES;

pub fn bench_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/line");

    let clock = SampleClock::new();
    clock.set_rate(48_000.0);

    for &size in BLOCK_SIZES {
        let mut line = Line::new(&clock);
        group.bench_with_input(BenchmarkId::new("line", size), &size, |b, _| {
            b.iter(|| {
                line.set(0.0, 1.0, black_box(0.5));
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += line.next();
                }
                sum
            })
        });

        let mut env = AttackDecay::new(&clock);
        group.bench_with_input(BenchmarkId::new("attack_decay", size), &size, |b, _| {
            b.iter(|| {
                env.set(black_box(0.001), 0.01);
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += env.next();
                }
                sum
            })
        });
    }

    group.finish();
}
