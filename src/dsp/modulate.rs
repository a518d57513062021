//! Block-rate modulation primitives.

use crate::Sample;

/*
Block averaging
===============

Control signals are folded to one value per 128-sample block.

  vibrato   The vibrato LFO's block is averaged by the reader node. The voice
            turns that average into a pitch multiplier and retunes its
            oscillators and string before the next block, so the pitch loop
            runs one block behind the LFO.

  cutoff    The filter's control port is averaged to -1.0..1.0 and scaled by
            the filter's octave range before the coefficients are computed.

Averages are integer means truncated toward zero, so a silent modulator
yields exactly zero.
*/

/// Integer mean of a block of samples (truncated toward zero).
#[inline]
pub fn block_average(samples: &[Sample]) -> i32 {
    if samples.is_empty() {
        return 0;
    }
    let sum: i64 = samples.iter().map(|&s| s as i64).sum();
    (sum / samples.len() as i64) as i32
}

/// Block average normalized to -1.0..1.0.
#[inline]
pub fn block_average_unit(samples: &[Sample]) -> f32 {
    block_average(samples) as f32 / 32_768.0
}
