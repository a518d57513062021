//! Benchmarks for the plucked string.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::dsp::pluck::PluckedString;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_pluck(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pluck");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0i16; size];

        // Steady state - one average and write-back per sample
        let mut string = PluckedString::with_seed(SAMPLE_RATE, 1);
        string.note_on(220.0, 1.0);
        string.prime();
        group.bench_with_input(BenchmarkId::new("sounding", size), &size, |b, _| {
            b.iter(|| {
                string.render(black_box(&mut buffer));
            })
        });

        // Re-pluck every block - includes filling the delay line with noise
        let mut string = PluckedString::with_seed(SAMPLE_RATE, 1);
        group.bench_with_input(BenchmarkId::new("pluck", size), &size, |b, _| {
            b.iter(|| {
                string.note_on(black_box(82.4), 1.0);
                string.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
