//! Benchmarks for the additive synth voice.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use murmur_dsp::dsp::noise::Noise;
use murmur_dsp::synth::AdditiveSynth;

use crate::BLOCK_SIZES;

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/additive");

    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut synth = AdditiveSynth::new(Noise::new(1));
        synth.set_chord(220.0);

        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += synth.process(black_box(sample_rate));
                }
                sum
            })
        });
    }

    group.finish();
}
