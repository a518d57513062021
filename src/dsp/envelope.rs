use crate::{graph::node::RenderCtx, Sample, MIN_TIME};

/*
DADSR Envelope Implementation
=============================

This module implements a linear envelope generator with an optional delay
stage in front of the classic ADSR - the workhorse of synthesizer amplitude
control. Every voice carries four of them: amplitude, filter, FM depth and
filter-LFO depth.

Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0). This multiplies
              the audio signal to control its amplitude over time.

  stage       Which phase of the envelope we're in: Idle, Delay, Attack,
              Decay, Sustain, or Release. A state machine governs transitions.

  gate        The note on/off signal. Gate high (note_on) triggers Delay
              (or Attack straight away when the delay time is zero).
              Gate low (note_off) triggers Release from wherever we are.

  increment   How much `level` changes per sample. Calculated from the stage
              duration and sample rate.

  sample_rate Samples per second (e.g., 44100). Converts time in seconds to
              time in samples.

  delay       Silence held between gate high and the start of Attack. Used on
              the filter LFO so the wobble fades in after the pluck.


The Shape: Linear Ramps
-----------------------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)

We use LINEAR ramps (straight lines) rather than exponential curves.

Linear pros:  Simple, predictable, CPU-cheap
Linear cons:  Doesn't match how acoustic sounds decay (exponential)

Many classic analog synths used linear envelopes. Exponential envelopes
sound more "natural" but linear is fine for learning and sounds punchy.


The Math: Time to Increment
---------------------------

The key calculation converts a time duration into a per-sample increment:

    increment = target_change / (time_seconds * sample_rate)

Example: Attack of 0.1 seconds at 48kHz
  - We need level to go from 0.0 → 1.0 (change of 1.0)
  - Total samples = 0.1 * 48000 = 4800 samples
  - increment = 1.0 / 4800 ≈ 0.000208

Each sample, we do: level += increment
After 4800 samples: level = 4800 * 0.000208 ≈ 1.0 ✓


The State Machine
-----------------

    ┌──────────────────────────────────────────────────────┐
    │                                                      │
    │   ┌──────┐ note_on ┌───────┐ ┌────────┐ level=1 ┌─────┐
    │   │ Idle │ ──────→ │ Delay │→│ Attack │ ──────→ │Decay│
    │   └──────┘         └───────┘ └────────┘         └─────┘
    │       ↑                    │                   │    │
    │       │                    │ note_off          │    │
    │       │                    ↓                   ↓    │
    │       │               ┌─────────┐  level=S  ┌─────┐ │
    │       │               │ Release │ ←──────── │ Sus │ │
    │       │               └─────────┘  note_off └─────┘ │
    │       │                    │                        │
    │       │    level=0         │                        │
    │       └────────────────────┘                        │
    │                                                      │
    └──────────────────────────────────────────────────────┘

Key behavior: note_off triggers Release from ANY stage (Delay, Attack, Decay,
or Sustain). Release always starts from the CURRENT level, not the sustain level.
This prevents clicks when releasing during attack.


Implementation Notes
--------------------

We calculate increment fresh each sample rather than caching it. This:
  - Handles sample_rate changes gracefully
  - Keeps code simple (no cache invalidation)
  - Has negligible performance cost (one division per sample)

Release is special: we snapshot the starting level and total samples at
note_off time, then interpolate linearly. This ensures we hit exactly 0.0.

Times are changed through setters while a note may be sounding. A new attack
or decay time takes effect on the next sample; a new release time takes
effect on the next note_off.
*/

/// The current stage of the envelope state machine.
/// Renamed from "State" to "Stage" to avoid confusion with Rust's state terminology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Gate low, envelope inactive, level = 0
    Delay,   // Gate high, holding at 0 until the delay time has passed
    Attack,  // Gate just went high, ramping up to 1.0
    Decay,   // Reached peak, ramping down to sustain level
    Sustain, // Holding at sustain level while gate is high
    Release, // Gate went low, ramping down to 0
}

pub struct Envelope {
    // Shape parameters
    delay_time: f32,   // seconds of silence before attack
    attack_time: f32,  // seconds to ramp 0 → 1
    decay_time: f32,   // seconds to ramp 1 → sustain
    sustain_level: f32, // level to hold (0.0 - 1.0)
    release_time: f32, // seconds to ramp current → 0

    // Runtime state (changes every sample)
    stage: EnvelopeState, // current stage of the state machine
    level: f32,           // current output value (0.0 - 1.0)

    // Delay bookkeeping
    delay_remaining_samples: u32,

    // Decay bookkeeping
    decay_start_level: f32, // level when decay began (usually 1.0)

    // Release bookkeeping (we pre-calculate at note_off for precision)
    release_start_level: f32, // level when release began
    release_total_samples: u32, // total samples for release phase
    release_elapsed_samples: u32, // samples elapsed since release began
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            delay_time: 0.0,
            attack_time: 0.01,   // 10ms default
            decay_time: 0.1,     // 100ms default
            sustain_level: 0.7,  // 70% level default
            release_time: 0.3,   // 300ms default

            stage: EnvelopeState::Idle,
            level: 0.0,
            delay_remaining_samples: 0,
            decay_start_level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            delay_time: 0.0,
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),

            stage: EnvelopeState::Idle,
            level: 0.0,
            delay_remaining_samples: 0,
            decay_start_level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    pub fn set_delay(&mut self, seconds: f32) {
        self.delay_time = seconds.max(0.0);
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.attack_time = seconds.max(MIN_TIME);
    }

    pub fn set_decay(&mut self, seconds: f32) {
        self.decay_time = seconds.max(MIN_TIME);
    }

    pub fn set_sustain(&mut self, level: f32) {
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.release_time = seconds.max(MIN_TIME);
    }

    /// Gate high: restart the delay (or attack) phase from zero.
    pub fn note_on(&mut self, ctx: &RenderCtx) {
        self.level = 0.0;
        self.release_elapsed_samples = 0;
        self.delay_remaining_samples = (self.delay_time * ctx.sample_rate).round() as u32;
        self.stage = if self.delay_remaining_samples > 0 {
            EnvelopeState::Delay
        } else {
            EnvelopeState::Attack
        };
    }

    /// Gate low: start the release phase from current level.
    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeState::Idle) {
            return;
        }

        // Snapshot current level - we'll interpolate from here to 0
        self.release_start_level = self.level;

        // Pre-calculate total samples for release (avoids division each sample)
        if self.release_time <= MIN_TIME {
            self.release_total_samples = 1;
        } else {
            self.release_total_samples =
                (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        }

        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance the envelope by one sample. Called once per sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Delay => {
                self.level = 0.0;
                self.delay_remaining_samples = self.delay_remaining_samples.saturating_sub(1);
                if self.delay_remaining_samples == 0 {
                    self.stage = EnvelopeState::Attack;
                }
            }

            EnvelopeState::Attack => {
                // increment = 1.0 / (attack_time * sample_rate)
                // This gives us the per-sample step to reach 1.0 in attack_time seconds
                let increment = 1.0 / (self.attack_time * ctx.sample_rate);
                self.level += increment;

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.decay_start_level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                // Ramp from decay_start_level down to sustain_level
                let target = self.sustain_level;
                let total_drop = self.decay_start_level - target;
                let decrement = total_drop / (self.decay_time * ctx.sample_rate);
                self.level -= decrement;

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                // Hold at sustain level until gate goes low
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                // Linear interpolation from release_start_level to 0
                // level = start * (1 - elapsed/total)
                let progress = self.release_elapsed_samples as f32
                    / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Scale a block of samples by the envelope, advancing one step per sample.
    pub fn process(&mut self, block: &mut [Sample], ctx: &RenderCtx) {
        for sample in block.iter_mut() {
            self.next_sample(ctx);
            *sample = (*sample as f32 * self.level) as Sample;
        }
    }

    /// Advance the envelope without any audio to scale.
    pub fn advance(&mut self, samples: usize, ctx: &RenderCtx) {
        for _ in 0..samples {
            self.next_sample(ctx);
        }
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    /// Get the current envelope level (0.0 to 1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Get the current envelope stage
    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
