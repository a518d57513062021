//! Block-rate unit generators for building voice graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with the plumbing needed to
//! live in a pull-based block graph: blocks are taken from a shared
//! [`BlockPool`](crate::io::BlockPool), inputs arrive as optional slices and
//! silence is represented by the absence of a block.

/// Fixed-gain amplifier.
pub mod amplify;
/// Constant (DC) control source.
pub mod dc;
/// Envelope node scaling its input.
pub mod envelope;
/// Low-pass filter with a cutoff modulation port.
pub mod filter;
/// Two-input crossfade.
pub mod interpolate;
/// Four-input gain mixer.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band and control-rate oscillators.
pub mod oscillator;
/// Block average sampler.
pub mod reader;
/// Plucked-string generator.
pub mod string;

pub use amplify::Amplifier;
pub use dc::Dc;
pub use interpolate::Crossfade;
pub use mix::Mixer;
pub use node::{GraphNode, Inputs, Modulatable, RenderCtx, MAX_PORTS, NO_INPUTS};
pub use reader::BlockReader;
