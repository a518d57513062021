use crate::{
    io::block::{AudioBlock, BlockPool},
    Sample,
};

/// Input ports per node. Mixers use all four; most nodes use one or two.
pub const MAX_PORTS: usize = 4;

/// Blocks delivered to a node's input ports for the current quantum.
/// `None` means nothing is connected or the source produced no block.
pub type Inputs<'a> = [Option<&'a [Sample]>; MAX_PORTS];

/// Context passed to graph nodes during rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Trait for things whose named parameters can be set from a control value
///
/// The synth implements this with its parameter enum so the patch engine can
/// drive it without knowing how each parameter is applied.
pub trait Modulatable {
    type Param: Copy;

    fn set_param(&mut self, param: Self::Param, value: f32);
}

/// Core trait for block-rate unit generators
///
/// Each quantum a node sees the blocks its sources produced and may return
/// one block of its own, taken from `pool`. Returning `None` means "silent
/// this quantum"; downstream nodes treat it as an unconnected port.
pub trait GraphNode: Send {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        ctx: &RenderCtx,
    ) -> Option<AudioBlock>;

    /// Check if this node is still producing sound
    fn is_active(&self) -> bool {
        true
    }
}

/// No inputs connected.
pub const NO_INPUTS: Inputs<'static> = [None; MAX_PORTS];
