//! Benchmarks for the delay line and grain shifter on the master bus.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::dsp::{delay::DelayLine, granular::GrainShifter};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let capacity = (0.2 * SAMPLE_RATE) as usize;

    for &size in BLOCK_SIZES {
        let input: Vec<i16> = (0..size).map(|i| (i as i16).wrapping_mul(97)).collect();
        let mut buffer = input.clone();

        // Short delay (1ms)
        let mut delay = DelayLine::new(capacity);
        group.bench_with_input(BenchmarkId::new("1ms", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                delay.render(black_box(&mut buffer), 44);
            })
        });

        // Longest delay the bus allows
        let mut delay = DelayLine::new(capacity);
        group.bench_with_input(BenchmarkId::new("200ms", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                delay.render(black_box(&mut buffer), capacity - 1);
            })
        });

        // Octave-down grains
        let mut grains = GrainShifter::new(capacity, 0.5);
        group.bench_with_input(BenchmarkId::new("grains", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                grains.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
