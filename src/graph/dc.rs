use crate::{
    dsp::to_sample,
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

/// Constant control signal, -1.0..=1.0.
pub struct Dc {
    level: f32,
}

impl Dc {
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(-1.0, 1.0),
        }
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = if level.is_finite() {
            level.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}

impl GraphNode for Dc {
    fn update(
        &mut self,
        _inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        _ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        let mut block = pool.allocate()?;
        block.fill(to_sample(self.level));
        Some(block)
    }
}
