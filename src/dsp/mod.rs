//! Low-level DSP primitives used by the graph nodes.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so they can be embedded directly inside voice structs. They stay focused on
//! the signal math; the graph layer handles block plumbing and wiring.

use crate::Sample;

/// Time-domain delay line for the master feedback loop.
pub mod delay;
/// Delay/attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable low-pass filter.
pub mod filter;
/// Half-speed grain pitch shifter.
pub mod granular;
/// Sample-by-sample crossfade between two blocks.
pub mod interpolate;
/// Block-rate modulation helpers.
pub mod modulate;
/// Periodic waveform oscillators.
pub mod oscillator;
/// Plucked-string physical model.
pub mod pluck;
/// Deterministic noise source for the string excitation.
pub mod rng;
/// Procedural single-cycle wavetables.
pub mod wavetable;

pub use envelope::EnvelopeState;

/// Clip a wide intermediate value into the signed 16-bit sample range.
#[inline]
pub fn saturate(value: i32) -> Sample {
    value.clamp(Sample::MIN as i32, Sample::MAX as i32) as Sample
}

/// Convert a normalized value (nominally -1.0..=1.0) to a sample, clipping.
#[inline]
pub fn to_sample(value: f32) -> Sample {
    saturate((value * Sample::MAX as f32).round() as i32)
}

/// Convert a sample to a normalized value in -1.0..1.0.
#[inline]
pub fn to_unit(sample: Sample) -> f32 {
    sample as f32 / 32_768.0
}
