use crate::{
    dsp::saturate,
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

/// Fixed gain stage. Zero gain produces no block.
pub struct Amplifier {
    gain: f32,
}

impl Amplifier {
    pub fn new(gain: f32) -> Self {
        let mut amp = Self { gain: 1.0 };
        amp.set_gain(gain);
        amp
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = if gain.is_finite() {
            gain.clamp(-32.0, 32.0)
        } else {
            0.0
        };
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl GraphNode for Amplifier {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        _ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        let input = inputs[0]?;
        if self.gain == 0.0 {
            return None;
        }

        let mut block = pool.allocate()?;
        for (out, &s) in block.iter_mut().zip(input) {
            *out = saturate((s as f32 * self.gain) as i32);
        }
        Some(block)
    }
}
