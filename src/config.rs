#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{patch::DEFAULT_MACRO_PARAMETERS, DEFAULT_SAMPLE_RATE};

/// Most voices a synth may be built with.
pub const MAX_VOICES: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f32),

    #[error("voice count must be between 1 and {max}, got {count}")]
    InvalidVoiceCount { count: usize, max: usize },

    #[error("block pool needs at least one block")]
    EmptyBlockPool,

    #[error("pitch bend range must be between 0 and 24 semitones, got {0}")]
    InvalidPitchBend(f32),

    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything fixed when the synth is built.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: f32,
    pub voice_count: usize,
    /// Blocks preallocated for voice rendering.
    pub block_pool_size: usize,
    /// Pitch-bend range in semitones.
    pub max_pitch_bend: f32,
    /// Parameters bound to each macro when a random patch is generated.
    pub macro_parameter_count: usize,
    /// Fixes patch generation and string noise; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            voice_count: 8,
            block_pool_size: 32,
            max_pitch_bend: 2.0,
            macro_parameter_count: DEFAULT_MACRO_PARAMETERS,
            seed: None,
        }
    }
}

impl SynthConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_voices(mut self, count: usize) -> Self {
        self.voice_count = count;
        self
    }

    pub fn with_block_pool_size(mut self, blocks: usize) -> Self {
        self.block_pool_size = blocks;
        self
    }

    pub fn with_max_pitch_bend(mut self, semitones: f32) -> Self {
        self.max_pitch_bend = semitones;
        self
    }

    pub fn with_macro_parameters(mut self, count: usize) -> Self {
        self.macro_parameter_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.voice_count == 0 || self.voice_count > MAX_VOICES {
            return Err(ConfigError::InvalidVoiceCount {
                count: self.voice_count,
                max: MAX_VOICES,
            });
        }
        if self.block_pool_size == 0 {
            return Err(ConfigError::EmptyBlockPool);
        }
        if !(0.0..=24.0).contains(&self.max_pitch_bend) {
            return Err(ConfigError::InvalidPitchBend(self.max_pitch_bend));
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
