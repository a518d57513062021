//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::f32::consts::PI;

use randsynth::{Sample, Synth, SynthConfig, AUDIO_BLOCK_SAMPLES};
use rustfft::{num_complex::Complex, FftPlanner};

pub const SAMPLE_RATE: f32 = 44_100.0;

/// Hann-windowed magnitude spectrum of `samples` (mean removed), one value per bin
/// up to Nyquist.
pub fn spectrum(samples: &[Sample]) -> Vec<f32> {
    let n = samples.len();
    let mean = samples.iter().map(|&s| s as f32).sum::<f32>() / n as f32;

    let mut buffer: Vec<Complex<f32>> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let window = 0.5 * (1.0 - (2.0 * PI * i as f32 / n as f32).cos());
            Complex::new((s as f32 - mean) * window, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    buffer[..n / 2].iter().map(|c| c.norm()).collect()
}

/// Frequency of the strongest bin at or above `min_hz`.
pub fn dominant_frequency(samples: &[Sample], min_hz: f32) -> f32 {
    let bins = spectrum(samples);
    let bin_hz = SAMPLE_RATE / samples.len() as f32;
    let first = (min_hz / bin_hz).ceil() as usize;

    let (index, _) = bins
        .iter()
        .enumerate()
        .skip(first)
        .fold((first, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
    index as f32 * bin_hz
}

pub fn peak(samples: &[Sample]) -> i32 {
    samples.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0)
}

pub fn synth(voices: usize) -> Synth {
    Synth::new(
        SynthConfig::default()
            .with_sample_rate(SAMPLE_RATE)
            .with_voices(voices)
            .with_seed(42),
    )
    .expect("valid config")
}

/// Render `blocks` blocks and concatenate them.
pub fn render(synth: &mut Synth, blocks: usize) -> Vec<Sample> {
    let mut out = Vec::with_capacity(blocks * AUDIO_BLOCK_SAMPLES);
    let mut block = [0; AUDIO_BLOCK_SAMPLES];
    for _ in 0..blocks {
        synth.render_block(&mut block);
        out.extend_from_slice(&block);
    }
    out
}
