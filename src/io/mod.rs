// Purpose - external interfaces: host block memory, MIDI events, conversions

pub mod block;
pub mod converter;
pub mod midi;

pub use block::{AudioBlock, BlockPool};
