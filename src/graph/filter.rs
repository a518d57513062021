use crate::{
    dsp::{filter::SVFilter, modulate::block_average_unit},
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

// port 0: audio, port 1: cutoff modulation (block-averaged)
impl GraphNode for SVFilter {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        let input = inputs[0]?;
        let control = inputs[1].map(block_average_unit).unwrap_or(0.0);

        let mut block = pool.allocate()?;
        block.copy_from_slice(input);
        self.render(&mut block[..], control, ctx.sample_rate);
        Some(block)
    }
}
