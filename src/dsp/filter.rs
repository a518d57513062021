use std::f32::consts::PI;

use crate::{
    dsp::{to_sample, to_unit},
    Sample,
};

/*
Resonant Low-Pass Filter
========================

A topology-preserving (trapezoidal) state-variable filter. Only the low-pass
response is used by the voice: it darkens the mixed oscillators and, with
resonance, adds the squelchy peak at the cutoff.

    gain
     │ ▁▁▁▁▁▁▁▁▁▁╱╲
     │           ╲
     │            ╲       -12 dB/octave
     │             ╲
     └──────────────┴─────────→ frequency
                 cutoff

Cutoff can be swept once per block by a control signal. A full-scale control
block moves the cutoff `octave_control` octaves above the base cutoff; a
negative one moves it below.

Resonance is 0.0..=0.95 here. The SVF self-oscillates near 1.0, which a
preset generator will eventually find, so it is kept just below.
*/

pub const MIN_CUTOFF_HZ: f32 = 20.0;
pub const MAX_RESONANCE: f32 = 0.95;

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
    octave_control: f32,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz: cutoff_hz.max(MIN_CUTOFF_HZ),
            resonance: 0.0,
            octave_control: 1.0,
        }
    }

    #[inline]
    fn compute_g(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let nyquist_guard = sample_rate * 0.45;
        let cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, nyquist_guard);
        (PI * cutoff / sample_rate).tan()
    }

    /// One step of the filter; returns the low-pass output.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> f32 {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    /// Cutoff after applying a block-averaged control value in -1.0..1.0.
    pub fn modulated_cutoff(&self, control: f32) -> f32 {
        self.cutoff_hz * (control * self.octave_control).exp2()
    }

    /// Filter a block in place. `control` is the block-averaged cutoff modulation.
    pub fn render(&mut self, block: &mut [Sample], control: f32, sample_rate: f32) {
        let g = Self::compute_g(self.modulated_cutoff(control), sample_rate);
        let k = 2.0 - (2.0 * self.resonance);

        for sample in block.iter_mut() {
            let out = self.next_sample(to_unit(*sample), k, g);
            *sample = to_sample(out);
        }
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff.max(MIN_CUTOFF_HZ);
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, MAX_RESONANCE);
    }

    pub fn set_octave_control(&mut self, octaves: f32) {
        self.octave_control = octaves.clamp(0.0, 7.0);
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }
}
