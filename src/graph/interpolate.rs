use crate::{
    dsp::interpolate::crossfade,
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

/// Crossfade between port 0 (factor 0.0) and port 1 (factor 1.0).
///
/// Output is produced only when both ports carry a block.
pub struct Crossfade {
    factor: f32,
}

impl Crossfade {
    pub fn new() -> Self {
        Self { factor: 0.5 }
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.5
        };
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl Default for Crossfade {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode for Crossfade {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        _ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        let (a, b) = (inputs[0]?, inputs[1]?);
        let mut block = pool.allocate()?;
        crossfade(a, b, self.factor, &mut block[..]);
        Some(block)
    }
}
