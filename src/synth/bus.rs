use crate::{
    dsp::{delay::DelayLine, granular::GrainShifter, saturate},
    Sample, AUDIO_BLOCK_SAMPLES,
};

/*
Master Bus
==========

    voices ──► Σ·voice_gain ──► feedback mixer ──┬──► volume ──► out
                                   ▲     ▲       │
                                   │     │       ▼
                                   │     └─── delay ◄──┘
                                   │             │
                                   └─ grains ◄───┘

The feedback mixer adds the delay return and the grain (octave-down) return
to the dry voice sum. Both returns are one block late, and each pass
through the delay is scaled by at most 0.8.
*/

/// Grain length of the pitch shifter.
const GRAIN_MS: f32 = 200.0;
/// Grain playback speed (one octave down).
const GRAIN_SPEED: f32 = 0.5;
/// Longest selectable delay.
const MAX_DELAY_MS: f32 = 200.0;

pub struct MasterBus {
    delay: DelayLine,
    delay_samples: usize,
    delay_feedback: f32,
    grains: GrainShifter,
    granular_feedback: f32,
    delay_return: [Sample; AUDIO_BLOCK_SAMPLES],
    grain_return: [Sample; AUDIO_BLOCK_SAMPLES],
    volume: f32,
    sample_rate: f32,
}

impl MasterBus {
    pub fn new(sample_rate: f32) -> Self {
        let max_delay = (MAX_DELAY_MS / 1_000.0 * sample_rate).ceil() as usize + 1;
        let grain = (GRAIN_MS / 1_000.0 * sample_rate) as usize;

        Self {
            delay: DelayLine::new(max_delay),
            delay_samples: (sample_rate / 1_000.0) as usize,
            delay_feedback: 0.0,
            grains: GrainShifter::new(grain, GRAIN_SPEED),
            granular_feedback: 0.0,
            delay_return: [0; AUDIO_BLOCK_SAMPLES],
            grain_return: [0; AUDIO_BLOCK_SAMPLES],
            volume: 1.0,
            sample_rate,
        }
    }

    pub fn set_delay_ms(&mut self, ms: f32) {
        let ms = ms.clamp(0.0, MAX_DELAY_MS);
        self.delay_samples = (ms / 1_000.0 * self.sample_rate) as usize;
    }

    pub fn set_delay_feedback(&mut self, gain: f32) {
        self.delay_feedback = gain.clamp(0.0, 0.95);
    }

    pub fn set_granular_feedback(&mut self, gain: f32) {
        self.granular_feedback = gain.clamp(0.0, 0.95);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 2.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Mix the dry voice sum through the feedback loop into `out`.
    pub fn process(&mut self, dry: &[i32; AUDIO_BLOCK_SAMPLES], out: &mut [Sample; AUDIO_BLOCK_SAMPLES]) {
        let mut mixed = [0 as Sample; AUDIO_BLOCK_SAMPLES];
        for i in 0..AUDIO_BLOCK_SAMPLES {
            let wet = self.delay_return[i] as f32 * self.delay_feedback
                + self.grain_return[i] as f32 * self.granular_feedback;
            mixed[i] = saturate(dry[i] + wet as i32);
        }

        for (ret, &s) in self.delay_return.iter_mut().zip(mixed.iter()) {
            *ret = self.delay.next_sample(s, self.delay_samples);
        }
        self.grain_return = self.delay_return;
        self.grains.process(&mut self.grain_return);

        for (o, &s) in out.iter_mut().zip(mixed.iter()) {
            *o = saturate((s as f32 * self.volume) as i32);
        }
    }
}
