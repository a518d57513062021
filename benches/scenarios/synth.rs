//! Benchmarks for the whole synth: voice bank, master bus and patch engine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randsynth::{io::midi::cc, Synth, SynthConfig, AUDIO_BLOCK_SAMPLES};

use crate::SAMPLE_RATE;

const CHORD: [u8; 8] = [45, 52, 57, 60, 64, 67, 71, 74];

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/synth");
    let mut out = [0i16; AUDIO_BLOCK_SAMPLES];

    for &held in &[1usize, 4, 8] {
        let config = SynthConfig::default()
            .with_sample_rate(SAMPLE_RATE)
            .with_voices(8)
            .with_seed(3);
        let Ok(mut synth) = Synth::new(config) else {
            return;
        };
        synth.control_change(cc::SOUND_CONTROLLER_1, 75); // wavetables only
        for &note in &CHORD[..held] {
            synth.note_on(note, 100);
        }

        group.bench_with_input(BenchmarkId::new("block", held), &held, |b, _| {
            b.iter(|| synth.render_block(black_box(&mut out)))
        });
    }

    // Note churn past the pool size: every event steals a voice
    let config = SynthConfig::default().with_voices(4).with_seed(3);
    if let Ok(mut synth) = Synth::new(config) {
        let mut step = 0usize;
        group.bench_function("stealing", |b| {
            b.iter(|| {
                let note = CHORD[step % CHORD.len()];
                step += 1;
                synth.note_on(black_box(note), 100);
                synth.render_block(&mut out);
            })
        });
    }

    // Random patch generation and macro rebinding
    let config = SynthConfig::default().with_seed(3);
    if let Ok(mut synth) = Synth::new(config) {
        group.bench_function("random_patch", |b| b.iter(|| synth.random_patch()));
    }

    group.finish();
}
