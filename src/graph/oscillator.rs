use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, Inputs, RenderCtx},
    io::block::{AudioBlock, BlockPool},
};

/*
Audio Oscillator
================

An oscillator is the fundamental sound source in a synthesizer. It generates
a repeating waveform at a specific frequency (pitch), producing the raw
audio material that gets shaped by filters, envelopes, and effects.

Waveform Types and Their Character:
-----------------------------------

Sine: The purest tone - a single frequency with no harmonics.
  - Use here: FM carrier and the voice's sine layer

Triangle: Mellow and soft - weak odd harmonics.
  - Harmonics: Odd harmonics only, falling off as 1/n²
  - Use here: vibrato and filter LFOs

Arbitrary: One cycle read from a wavetable.
  - Use here: the four morphing wavetable oscillators

Ports
-----

  port 0    frequency modulation. Each sample shifts the pitch exponentially,
            a full-scale sample moving it `fm_octaves` octaves.

A node whose amplitude is zero (or an arbitrary oscillator without a table)
produces no block at all, so downstream mixers skip it.
*/

impl GraphNode for OscillatorBlock {
    fn update(
        &mut self,
        inputs: &Inputs<'_>,
        pool: &mut BlockPool,
        ctx: &RenderCtx,
    ) -> Option<AudioBlock> {
        if self.is_silent() {
            return None;
        }

        let mut block = pool.allocate()?;
        self.render(&mut block[..], inputs[0], ctx.sample_rate);
        Some(block)
    }
}
