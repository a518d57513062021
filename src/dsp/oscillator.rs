use std::{f32::consts::TAU, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{to_sample, to_unit, wavetable::Wavetable},
    Sample,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Triangle,
    /// Reads the attached wavetable; silent until one is attached.
    Arbitrary,
}

/// Phase-accumulating oscillator with optional exponential FM input.
///
/// A full-scale sample on the FM input shifts the frequency by
/// `fm_octaves` octaves up (positive) or down (negative).
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32, // 0.0..1.0
    frequency: f32,
    amplitude: f32,
    fm_octaves: f32,
    table: Option<Arc<Wavetable>>,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            frequency: 440.0,
            amplitude: 1.0,
            fm_octaves: 0.0,
            table: None,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn arbitrary() -> Self {
        Self::new(OscillatorWaveform::Arbitrary)
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = if hz.is_finite() { hz.max(0.0) } else { 0.0 };
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    pub fn set_fm_octaves(&mut self, octaves: f32) {
        self.fm_octaves = octaves.clamp(-12.0, 12.0);
    }

    pub fn set_table(&mut self, table: Arc<Wavetable>) {
        self.table = Some(table);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// True when rendering would only produce silence.
    pub fn is_silent(&self) -> bool {
        self.amplitude == 0.0
            || (self.waveform == OscillatorWaveform::Arbitrary && self.table.is_none())
    }

    #[inline]
    fn shape(&self, phase: f32) -> f32 {
        match self.waveform {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Triangle => {
                // 0 → 1 → 0 → -1 → 0 over one cycle, matching the sine's phase.
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
            OscillatorWaveform::Arbitrary => match &self.table {
                Some(table) => table.lookup(phase),
                None => 0.0,
            },
        }
    }

    pub fn render(&mut self, out: &mut [Sample], fm: Option<&[Sample]>, sample_rate: f32) {
        let base_increment = self.frequency / sample_rate;

        for (i, sample) in out.iter_mut().enumerate() {
            *sample = to_sample(self.shape(self.phase) * self.amplitude);

            let increment = match fm {
                Some(modulator) if self.fm_octaves != 0.0 => {
                    let m = modulator.get(i).copied().map(to_unit).unwrap_or(0.0);
                    base_increment * (m * self.fm_octaves).exp2()
                }
                _ => base_increment,
            };

            self.phase += increment;
            self.phase -= self.phase.floor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    fn zero_crossings(samples: &[Sample]) -> usize {
        samples
            .windows(2)
            .filter(|w| (w[0] < 0) != (w[1] < 0))
            .count()
    }

    #[test]
    fn sine_has_expected_zero_crossings() {
        let mut osc = OscillatorBlock::sine();
        osc.set_frequency(441.0);
        let mut out = vec![0; 4410];
        osc.render(&mut out, None, SAMPLE_RATE);

        // 44.1 cycles → ~88 crossings
        let crossings = zero_crossings(&out);
        assert!((86..=90).contains(&crossings), "crossings={crossings}");
    }

    #[test]
    fn triangle_peaks_at_quarter_cycle() {
        let mut osc = OscillatorBlock::triangle();
        osc.set_frequency(SAMPLE_RATE / 8.0);
        let mut out = [0; 8];
        osc.render(&mut out, None, SAMPLE_RATE);
        assert_eq!(out[2], i16::MAX);
        assert_eq!(out[6], -i16::MAX);
    }

    #[test]
    fn arbitrary_without_table_is_silent() {
        let mut osc = OscillatorBlock::arbitrary();
        assert!(osc.is_silent());
        let mut out = [7; 16];
        osc.render(&mut out, None, SAMPLE_RATE);
        assert!(out.iter().all(|&s| s == 0));
    }

    #[test]
    fn positive_fm_raises_pitch() {
        let mut plain = OscillatorBlock::sine();
        plain.set_frequency(200.0);
        let mut modulated = OscillatorBlock::sine();
        modulated.set_frequency(200.0);
        modulated.set_fm_octaves(1.0);

        let fm = vec![i16::MAX; 4410];
        let mut a = vec![0; 4410];
        let mut b = vec![0; 4410];
        plain.render(&mut a, None, SAMPLE_RATE);
        modulated.render(&mut b, Some(&fm), SAMPLE_RATE);

        assert!(zero_crossings(&b) > zero_crossings(&a) * 3 / 2);
    }

    #[test]
    fn amplitude_scales_output() {
        // A quarter cycle per sample lands the second sample on the peak.
        let mut osc = OscillatorBlock::triangle();
        osc.set_frequency(SAMPLE_RATE / 4.0);
        osc.set_amplitude(0.5);
        let mut out = [0; 4];
        osc.render(&mut out, None, SAMPLE_RATE);
        assert_eq!(out[1], to_sample(0.5));
    }
}
