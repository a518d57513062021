//! Benchmarks for the low-pass state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::dsp::filter::SVFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<i16> = (0..size)
            .map(|i| (((i as f32 / size as f32) * 2.0 - 1.0) * 16_000.0) as i16)
            .collect();

        let mut filter = SVFilter::lowpass(1000.0);
        filter.set_resonance(0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 0.0, SAMPLE_RATE);
            })
        });

        // Cutoff modulated each block - recomputes the coefficient
        let mut filter = SVFilter::lowpass(1000.0);
        filter.set_resonance(0.8);
        filter.set_octave_control(4.0);
        let mut buffer = input.clone();
        let mut control = 0.0f32;
        group.bench_with_input(BenchmarkId::new("modulated", size), &size, |b, _| {
            b.iter(|| {
                control = (control + 0.1) % 1.0;
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(control), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
