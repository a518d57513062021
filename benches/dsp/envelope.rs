//! Benchmarks for the DADSR envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::{dsp::envelope::Envelope, graph::RenderCtx};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![12_000i16; size];

        // Attack phase (ramping up)
        let mut env = Envelope::adsr(0.1, 0.1, 0.7, 0.3);
        env.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.process(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::adsr(0.001, 0.001, 0.7, 0.3);
        env.note_on(&ctx);
        env.advance(200, &ctx);
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.process(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Block-rate advance without audio, as used for idle modulation paths
        let mut env = Envelope::adsr(0.5, 0.5, 0.7, 0.3);
        env.set_delay(0.2);
        env.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("advance", size), &size, |b, &n| {
            b.iter(|| {
                env.advance(black_box(n), &ctx);
            })
        });
    }

    group.finish();
}
