//! Benchmarks for one complete voice graph.
//!
//! The host block is fixed at 128 samples, so these iterate over source
//! mixes rather than block sizes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::{
    dsp::wavetable::WavetableBank, io::BlockPool, synth::voice::Voice,
};

use crate::SAMPLE_RATE;

/// `(name, string, sine, wavetable)` voice mixer gains.
const SOURCES: &[(&str, f32, f32, f32)] = &[
    ("string", 1.0, 0.0, 0.0),
    ("wavetable", 0.0, 0.0, 1.0),
    ("all_sources", 0.5, 0.3, 0.5),
];

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let bank = WavetableBank::generate();
    let mut pool = BlockPool::new(32);

    for &(name, string, sine, wavetable) in SOURCES {
        let mut voice = Voice::new(SAMPLE_RATE, 1);
        voice.set_start_table(&bank.select(10.0));
        voice.set_end_table(&bank.select(100.0));
        let nodes = voice.nodes_mut();
        nodes.voice_mixer.set_gain(0, string);
        nodes.voice_mixer.set_gain(1, sine);
        nodes.voice_mixer.set_gain(2, wavetable);
        nodes.fm_mixer.set_gain(1, 0.05);
        nodes.filter.set_cutoff(4_000.0);
        nodes.amp_env.set_sustain(1.0);
        voice.note_on(45, 110.0, 100, 1);

        group.bench_with_input(BenchmarkId::new("voice", name), &name, |b, _| {
            b.iter(|| {
                if let Some(block) = voice.render(black_box(&mut pool)) {
                    pool.release(block);
                }
            })
        });
    }

    // Vibrato feedback retunes all five oscillators every block
    let mut voice = Voice::new(SAMPLE_RATE, 1);
    voice.nodes_mut().voice_mixer.set_gain(0, 1.0);
    voice.vibrato_on();
    voice.note_on(45, 110.0, 100, 1);
    group.bench_function("voice/vibrato", |b| {
        b.iter(|| {
            if let Some(block) = voice.render(black_box(&mut pool)) {
                pool.release(block);
            }
        })
    });

    group.finish();
}
