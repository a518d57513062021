use crate::{
    dsp::saturate,
    graph::node::{GraphNode, Inputs, RenderCtx, MAX_PORTS},
    io::block::{AudioBlock, BlockPool},
    AUDIO_BLOCK_SAMPLES,
};

/*
Four-Channel Mixer
==================

Sums up to four inputs, each with its own gain:

    out = in0·g0 + in1·g1 + in2·g2 + in3·g3

The sum is accumulated wide and clipped once at the end, so two loud inputs
saturate instead of wrapping around.

Gains default to 1.0 and are clamped to ±MAX_GAIN. A port that is
unconnected, silent, or has zero gain contributes nothing; if no port
contributes, the mixer itself produces no block.
*/

pub const MAX_GAIN: f32 = 32.0;

pub struct Mixer {
    gains: [f32; MAX_PORTS],
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            gains: [1.0; MAX_PORTS],
        }
    }

    pub fn with_gains(gains: [f32; MAX_PORTS]) -> Self {
        let mut mixer = Self::new();
        for (channel, gain) in gains.into_iter().enumerate() {
            mixer.set_gain(channel, gain);
        }
        mixer
    }

    /// Out-of-range channels are ignored.
    pub fn set_gain(&mut self, channel: usize, gain: f32) {
        if let Some(slot) = self.gains.get_mut(channel) {
            *slot = if gain.is_finite() {
                gain.clamp(-MAX_GAIN, MAX_GAIN)
            } else {
                0.0
            };
        }
    }

    pub fn gain(&self, channel: usize) -> f32 {
        self.gains.get(channel).copied().unwrap_or(0.0)
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode for Mixer {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        _ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        let mut acc = [0i32; AUDIO_BLOCK_SAMPLES];
        let mut contributed = false;

        for (input, &gain) in inputs.iter().zip(self.gains.iter()) {
            let Some(samples) = input else { continue };
            if gain == 0.0 {
                continue;
            }
            contributed = true;
            for (a, &s) in acc.iter_mut().zip(samples.iter()) {
                *a += (s as f32 * gain) as i32;
            }
        }

        if !contributed {
            return None;
        }

        let mut block = pool.allocate()?;
        for (out, a) in block.iter_mut().zip(acc) {
            *out = saturate(a);
        }
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderCtx {
        RenderCtx::new(44_100.0)
    }

    #[test]
    fn sums_weighted_inputs() {
        let mut pool = BlockPool::new(1);
        let mut mixer = Mixer::with_gains([0.5, 0.25, 1.0, 1.0]);
        let a = [1_000; AUDIO_BLOCK_SAMPLES];
        let b = [4_000; AUDIO_BLOCK_SAMPLES];
        let inputs = [Some(&a[..]), Some(&b[..]), None, None];

        let block = mixer.update(&inputs, &mut pool, &ctx()).unwrap();
        assert!(block.iter().all(|&s| s == 1_500));
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let mut pool = BlockPool::new(1);
        let mut mixer = Mixer::new();
        let a = [30_000; AUDIO_BLOCK_SAMPLES];
        let inputs = [Some(&a[..]), Some(&a[..]), None, None];

        let block = mixer.update(&inputs, &mut pool, &ctx()).unwrap();
        assert!(block.iter().all(|&s| s == i16::MAX));
    }

    #[test]
    fn all_zero_gains_produce_no_block() {
        let mut pool = BlockPool::new(1);
        let mut mixer = Mixer::with_gains([0.0; MAX_PORTS]);
        let a = [1_000; AUDIO_BLOCK_SAMPLES];
        let inputs = [Some(&a[..]), None, None, None];
        assert!(mixer.update(&inputs, &mut pool, &ctx()).is_none());
    }

    #[test]
    fn gains_are_clamped() {
        let mut mixer = Mixer::new();
        mixer.set_gain(0, 1_000.0);
        mixer.set_gain(1, f32::NAN);
        mixer.set_gain(9, 1.0);
        assert_eq!(mixer.gain(0), MAX_GAIN);
        assert_eq!(mixer.gain(1), 0.0);
    }
}
