use crate::{
    dsp::pluck::{PluckedString, StringState},
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

impl GraphNode for PluckedString {
    fn update(
        &mut self,
        _inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        _ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        if self.state() == StringState::Idle {
            return None;
        }
        if self.state() == StringState::Priming {
            self.prime();
        }

        let Some(mut block) = pool.allocate() else {
            tracing::debug!("no block for plucked string, going idle");
            self.note_off();
            return None;
        };
        self.render(&mut block[..]);
        Some(block)
    }

    fn is_active(&self) -> bool {
        self.is_sounding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NO_INPUTS;

    #[test]
    fn idle_string_produces_nothing() {
        let mut pool = BlockPool::new(1);
        let ctx = RenderCtx::new(44_100.0);
        let mut string = PluckedString::new(ctx.sample_rate);
        assert!(string.update(&NO_INPUTS, &mut pool, &ctx).is_none());
    }

    #[test]
    fn allocation_failure_drops_to_idle() {
        let mut pool = BlockPool::new(0);
        let ctx = RenderCtx::new(44_100.0);
        let mut string = PluckedString::new(ctx.sample_rate);
        string.note_on(220.0, 1.0);

        assert!(string.update(&NO_INPUTS, &mut pool, &ctx).is_none());
        assert_eq!(string.state(), StringState::Idle);
    }

    #[test]
    fn plucked_string_fills_a_block() {
        let mut pool = BlockPool::new(1);
        let ctx = RenderCtx::new(44_100.0);
        let mut string = PluckedString::new(ctx.sample_rate);
        string.note_on(220.0, 1.0);

        let block = string.update(&NO_INPUTS, &mut pool, &ctx).unwrap();
        assert!(block.iter().any(|&s| s != 0));
        assert_eq!(string.state(), StringState::Sounding);
    }
}
