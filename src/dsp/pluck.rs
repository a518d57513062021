use crate::{dsp::rng::ParkMiller, Sample};

/*
Plucked String (Karplus-Strong)
===============================

A plucked string is simulated with nothing more than a short circular buffer
of noise and a two-point average. It is one of the cheapest physical models
there is, and it still sounds convincingly like a guitar or harp.

Vocabulary
----------

  buffer      A circular delay line holding one period of the string.
              Its active length sets the pitch: len = sample_rate / frequency.

  excitation  The burst of noise written into the buffer when the string is
              plucked. Louder plucks write larger noise values.

  cursor      The read/write position inside the active part of the buffer.

  prior       The most recently emitted output sample. Each new output is the
              average of the buffered value and this one.


The Loop
--------

    ┌──────────────────────────── len samples ───────────────────────────┐
    │ n0  n1  n2  n3  ...                                           n(len-1) │
    └──▲──────────────────────────────────────────────────────────────────┘
       │ cursor
       │
       out = (buffer[cursor] + prior) / 2
       buffer[cursor] = out
       prior = out
       cursor = (cursor + 1) mod len

Averaging is a gentle low-pass. Every trip around the loop removes a bit more
high-frequency energy, so the tone gets darker and quieter on its own, just
like a real string. Nothing ever re-excites the buffer, so the amplitude can
only fall.


States
------

    ┌──────┐ note_on  ┌─────────┐ first render ┌──────────┐
    │ Idle │ ───────→ │ Priming │ ───────────→ │ Sounding │
    └──────┘          └─────────┘              └──────────┘
       ↑                                             │
       └──────────────── note_off ───────────────────┘

Priming is deferred to the first render after note_on so a burst of note
events within one block only writes the excitation once.


Excitation
----------

Noise comes from a Park–Miller generator. The low 16 bits of each draw are
treated as a signed sample and scaled by `velocity × 65535`:

    value = (magnitude × noise) >> 16

so a full-velocity pluck spans the whole 16-bit range. The generator state
persists across plucks; two plucks never get the same noise unless the seed
is reset.


Buffer Length
-------------

The buffer has fixed capacity (STRING_BUFFER_CAPACITY). The active length is
`round(sample_rate / frequency)` clamped to [2, capacity]. At 44.1 kHz the
capacity covers everything down to roughly 82 Hz; lower notes are clamped and
sound sharp.
*/

/// Maximum delay-line length in samples.
pub const STRING_BUFFER_CAPACITY: usize = 536;

const MIN_STRING_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringState {
    Idle,     // No output
    Priming,  // Excitation pending, written on the next render
    Sounding, // Buffer circulating and decaying
}

pub struct PluckedString {
    buffer: [Sample; STRING_BUFFER_CAPACITY],
    len: usize,
    cursor: usize,
    magnitude: i32,
    rng: ParkMiller,
    state: StringState,
    sample_rate: f32,
}

impl PluckedString {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_seed(sample_rate, 1)
    }

    pub fn with_seed(sample_rate: f32, seed: u32) -> Self {
        Self {
            buffer: [0; STRING_BUFFER_CAPACITY],
            len: STRING_BUFFER_CAPACITY,
            cursor: 0,
            magnitude: 0,
            rng: ParkMiller::new(seed),
            state: StringState::Idle,
            sample_rate,
        }
    }

    /// Pluck the string. Velocity is 0.0..=1.0; anything above 1.0 is
    /// clamped, zero or below (or a non-positive frequency) silences it.
    pub fn note_on(&mut self, frequency: f32, velocity: f32) {
        if !(velocity > 0.0) || !(frequency > 0.0) || !frequency.is_finite() {
            self.note_off();
            return;
        }

        let velocity = velocity.min(1.0);
        self.magnitude = (velocity * 65_535.0) as i32;
        self.len = self.length_for(frequency);
        self.cursor = 0;
        self.state = StringState::Priming;
    }

    pub fn note_off(&mut self) {
        self.state = StringState::Idle;
    }

    /// Retune a plucked string without re-exciting it. Ignored while idle.
    pub fn set_pitch(&mut self, frequency: f32) {
        if self.state == StringState::Idle || !(frequency > 0.0) || !frequency.is_finite() {
            return;
        }

        self.len = self.length_for(frequency);
        if self.cursor >= self.len {
            self.cursor = 0;
        }
    }

    /// Write the noise burst into the active part of the buffer.
    pub fn prime(&mut self) {
        for slot in self.buffer[..self.len].iter_mut() {
            let noise = self.rng.next_i16() as i32;
            *slot = ((self.magnitude * noise) >> 16) as Sample;
        }
        self.cursor = 0;
        self.state = StringState::Sounding;
    }

    /// Produce `out.len()` samples. Idle strings render silence.
    pub fn render(&mut self, out: &mut [Sample]) {
        match self.state {
            StringState::Idle => {
                out.fill(0);
                return;
            }
            StringState::Priming => self.prime(),
            StringState::Sounding => {}
        }

        let previous = if self.cursor == 0 {
            self.len - 1
        } else {
            self.cursor - 1
        };
        let mut prior = self.buffer[previous] as i32;

        for sample in out.iter_mut() {
            let averaged = ((self.buffer[self.cursor] as i32 + prior) >> 1) as Sample;
            self.buffer[self.cursor] = averaged;
            *sample = averaged;
            prior = averaged as i32;

            self.cursor += 1;
            if self.cursor >= self.len {
                self.cursor = 0;
            }
        }
    }

    fn length_for(&self, frequency: f32) -> usize {
        let ideal = (self.sample_rate / frequency).round();
        let len = (ideal as usize).clamp(MIN_STRING_LEN, STRING_BUFFER_CAPACITY);
        if ideal as usize != len {
            tracing::debug!(frequency, ideal, len, "string length clamped to buffer capacity");
        }
        len
    }

    pub fn state(&self) -> StringState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state != StringState::Idle
    }

    /// Active delay-line length in samples.
    pub fn active_len(&self) -> usize {
        self.len
    }

    /// The active part of the delay line.
    pub fn buffer(&self) -> &[Sample] {
        &self.buffer[..self.len]
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }
}
