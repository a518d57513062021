//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::dsp::{oscillator::OscillatorBlock, wavetable::WavetableBank};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let bank = WavetableBank::generate();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0i16; size];
        let fm: Vec<i16> = (0..size).map(|i| ((i * 97) % 4096) as i16).collect();

        // Sine - uses sin() transcendental function
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), None, SAMPLE_RATE);
            })
        });

        // Sine with exponential FM - adds exp2() per sample
        let mut osc = OscillatorBlock::sine();
        osc.set_fm_octaves(1.0);
        group.bench_with_input(BenchmarkId::new("sine_fm", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), Some(black_box(&fm[..])), SAMPLE_RATE);
            })
        });

        // Triangle - absolute value
        let mut osc = OscillatorBlock::triangle();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), None, SAMPLE_RATE);
            })
        });

        // Wavetable - interpolated table lookup
        let mut osc = OscillatorBlock::arbitrary();
        osc.set_table(bank.select(64.0));
        group.bench_with_input(BenchmarkId::new("wavetable", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), None, SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
