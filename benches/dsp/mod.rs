//! Benchmarks for low-level DSP primitives.

mod delay;
mod envelope;
mod filter;
mod oscillator;
mod pluck;

pub use delay::bench_delay;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use pluck::bench_pluck;
