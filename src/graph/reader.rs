use crate::{
    dsp::modulate::block_average,
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

/// Terminal node that samples its input once per block.
///
/// Holds the integer mean of the last block it saw; the value is kept when
/// the input goes silent. Produces no output of its own.
#[derive(Default)]
pub struct BlockReader {
    value: i32,
}

impl BlockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl GraphNode for BlockReader {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        _pool: &mut BlockPool,
        _ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        if let Some(input) = inputs[0] {
            self.value = block_average(input);
        }
        None
    }
}
