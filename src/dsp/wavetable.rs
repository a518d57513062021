use std::{f32::consts::TAU, sync::Arc};

use crate::{dsp::to_sample, Sample};

/*
Wavetables
==========

A wavetable is one cycle of a waveform stored as samples. An oscillator reads
through it at whatever speed gives the wanted pitch, interpolating between
neighbouring points.

The bank holds WAVETABLE_COUNT tables built additively at startup. Tables
are grouped in families of four that repeat with a growing harmonic count,
so sweeping a 0-127 controller across the bank goes from near-sine to dense
and bright:

    k % 4 == 0   all harmonics, 1/n falloff       (saw-like)
    k % 4 == 1   odd harmonics, 1/n falloff       (square-like)
    k % 4 == 2   odd harmonics, alternating 1/n²  (triangle-like)
    k % 4 == 3   all harmonics, peak around a moving formant

Every table is normalized to full scale. Tables live behind `Arc` so voices
can switch tables by cloning a pointer instead of copying samples.
*/

pub const WAVETABLE_LEN: usize = 256;
pub const WAVETABLE_COUNT: usize = 128;

pub struct Wavetable {
    samples: [Sample; WAVETABLE_LEN],
}

impl Wavetable {
    /// Sample `shape` over one cycle (phase 0.0..1.0) and normalize the result.
    pub fn from_fn(shape: impl Fn(f32) -> f32) -> Self {
        let mut raw = [0.0f32; WAVETABLE_LEN];
        for (i, value) in raw.iter_mut().enumerate() {
            *value = shape(i as f32 / WAVETABLE_LEN as f32);
        }

        let peak = raw.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let scale = if peak > 0.0 { 1.0 / peak } else { 0.0 };

        let mut samples = [0; WAVETABLE_LEN];
        for (sample, value) in samples.iter_mut().zip(raw) {
            *sample = to_sample(value * scale);
        }
        Self { samples }
    }

    /// Sum of sine partials: `(harmonic, amplitude)` pairs.
    pub fn additive(partials: impl Iterator<Item = (usize, f32)> + Clone) -> Self {
        Self::from_fn(|phase| {
            partials
                .clone()
                .map(|(harmonic, amp)| amp * (TAU * harmonic as f32 * phase).sin())
                .sum()
        })
    }

    /// Linearly interpolated lookup, phase in 0.0..1.0. Returns -1.0..=1.0.
    #[inline]
    pub fn lookup(&self, phase: f32) -> f32 {
        let position = phase * WAVETABLE_LEN as f32;
        let index = position as usize % WAVETABLE_LEN;
        let next = (index + 1) % WAVETABLE_LEN;
        let frac = position - position.floor();

        let a = self.samples[index] as f32;
        let b = self.samples[next] as f32;
        (a + (b - a) * frac) / 32_768.0
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

pub struct WavetableBank {
    tables: Vec<Arc<Wavetable>>,
}

impl WavetableBank {
    pub fn generate() -> Self {
        let tables = (0..WAVETABLE_COUNT)
            .map(|k| Arc::new(Self::table(k)))
            .collect();
        Self { tables }
    }

    fn table(k: usize) -> Wavetable {
        let harmonics = 1 + k / 4;
        match k % 4 {
            0 => Wavetable::additive((1..=harmonics).map(|n| (n, 1.0 / n as f32))),
            1 => Wavetable::additive((1..=harmonics).map(|n| (2 * n - 1, 1.0 / (2 * n - 1) as f32))),
            2 => Wavetable::additive((1..=harmonics).map(|n| {
                let h = 2 * n - 1;
                let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
                (h, sign / (h * h) as f32)
            })),
            _ => {
                let formant = 1.0 + harmonics as f32 / 2.0;
                Wavetable::additive((1..=harmonics).map(move |n| {
                    let distance = (n as f32 - formant) / 2.0;
                    (n, 0.15 + (-distance * distance).exp())
                }))
            }
        }
    }

    /// Table for a 0-127 controller value (clamped).
    pub fn select(&self, value: f32) -> Arc<Wavetable> {
        let index = (value.clamp(0.0, (WAVETABLE_COUNT - 1) as f32)) as usize;
        Arc::clone(&self.tables[index.min(self.tables.len() - 1)])
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_normalized() {
        let bank = WavetableBank::generate();
        assert_eq!(bank.len(), WAVETABLE_COUNT);
        for k in [0.0, 1.0, 2.0, 3.0, 64.0, 127.0] {
            let table = bank.select(k);
            let peak = table.samples().iter().map(|&s| (s as i32).abs()).max().unwrap();
            assert!(peak > 32_000, "table {k} peak {peak}");
        }
    }

    #[test]
    fn first_table_is_a_sine() {
        let bank = WavetableBank::generate();
        let table = bank.select(0.0);
        assert!(table.lookup(0.0).abs() < 0.01);
        assert!((table.lookup(0.25) - 1.0).abs() < 0.01);
        assert!((table.lookup(0.75) + 1.0).abs() < 0.01);
    }

    #[test]
    fn selection_clamps_out_of_range_values() {
        let bank = WavetableBank::generate();
        assert!(Arc::ptr_eq(&bank.select(-5.0), &bank.select(0.0)));
        assert!(Arc::ptr_eq(&bank.select(500.0), &bank.select(127.0)));
    }
}
