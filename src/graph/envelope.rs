use crate::{
    dsp::envelope::Envelope,
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
    AUDIO_BLOCK_SAMPLES,
};

// The envelope scales whatever arrives on port 0. Without an input it still
// advances so note timing stays correct, but produces no block.
impl GraphNode for Envelope {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        let Some(input) = inputs[0] else {
            self.advance(AUDIO_BLOCK_SAMPLES, ctx);
            return None;
        };

        let Some(mut block) = pool.allocate() else {
            self.advance(AUDIO_BLOCK_SAMPLES, ctx);
            return None;
        };
        block.copy_from_slice(input);
        self.process(&mut block[..], ctx);
        Some(block)
    }

    fn is_active(&self) -> bool {
        Envelope::is_active(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NO_INPUTS;

    #[test]
    fn envelope_advances_without_input() {
        let ctx = RenderCtx::new(1_000.0);
        let mut pool = BlockPool::new(2);
        let mut env = Envelope::adsr(0.01, 0.01, 0.5, 0.05);
        env.note_on(&ctx);
        env.note_off(&ctx);

        // Release is 50 samples; one block is 128.
        assert!(env.update(&NO_INPUTS, &mut pool, &ctx).is_none());
        assert!(!GraphNode::is_active(&env));
    }

    #[test]
    fn envelope_scales_input_block() {
        let ctx = RenderCtx::new(44_100.0);
        let mut pool = BlockPool::new(2);
        let mut env = Envelope::adsr(0.0, 0.01, 1.0, 0.05);
        env.note_on(&ctx);

        let source = [8_000; AUDIO_BLOCK_SAMPLES];
        let inputs = [Some(&source[..]), None, None, None];
        let block = env.update(&inputs, &mut pool, &ctx).unwrap();
        assert_eq!(block[AUDIO_BLOCK_SAMPLES - 1], 8_000);
    }
}
