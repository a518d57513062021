pub mod config;
pub mod dsp;
pub mod graph; // Block-rate unit generators
pub mod io;
pub mod patch; // Parameter registry, macros and random patches
pub mod synth; // Voices, allocation and note dispatch

pub use config::{ConfigError, SynthConfig};
pub use synth::engine::Synth;

/// One sample as exchanged with the audio host (signed 16-bit).
pub type Sample = i16;

/// Samples per block pulled by the host each scheduling quantum.
pub const AUDIO_BLOCK_SAMPLES: usize = 128;
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
