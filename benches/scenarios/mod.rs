//! Real-world scenario benchmarks.
//!
//! These render whole blocks the way the audio callback does: one voice graph
//! on its own, then the full synth with several notes held.

mod synth;
mod voices;

pub use synth::bench_synth;
pub use voices::bench_voices;
