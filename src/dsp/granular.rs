use crate::{dsp::saturate, Sample};

/*
Grain Pitch Shifter
===================

Two read heads trail the write head through a circular buffer. Each head's
distance behind the writer grows by `(1 − speed)` samples per sample, so the
heads play back at `speed` times the input rate. At 0.5 that is one octave
down.

When a head has drifted a whole grain behind it jumps back to the writer.
The heads sit half a grain apart and each is weighted by a triangular window
that is zero at the jump, so the two always sum to unity and the jumps do
not click:

    weight
     1 ┤   ╱╲      ╱╲
       │  ╱  ╲    ╱  ╲      head A
       │ ╱    ╲  ╱    ╲
     0 ┼╱──────╲╱──────╲──→ time
              ╱╲      ╱╲    head B (offset half a grain)
*/

pub struct GrainShifter {
    buffer: Vec<Sample>,
    write_pos: usize,
    grain_len: f32,
    speed: f32,
    lag: f32, // head A's distance behind the writer, 0..grain_len
}

impl GrainShifter {
    pub fn new(grain_samples: usize, speed: f32) -> Self {
        let grain_samples = grain_samples.max(2);
        Self {
            buffer: vec![0; grain_samples + 2],
            write_pos: 0,
            grain_len: grain_samples as f32,
            speed: speed.clamp(0.0, 1.0),
            lag: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    fn window(&self, lag: f32) -> f32 {
        1.0 - (2.0 * lag / self.grain_len - 1.0).abs()
    }

    #[inline]
    fn read(&self, lag: f32) -> f32 {
        let len = self.buffer.len();
        let back = (lag as usize).min(len - 1);
        self.buffer[(self.write_pos + len - back) % len] as f32
    }

    pub fn process(&mut self, block: &mut [Sample]) {
        let len = self.buffer.len();
        let half = self.grain_len / 2.0;

        for sample in block.iter_mut() {
            self.buffer[self.write_pos] = *sample;

            let lag_a = self.lag;
            let mut lag_b = self.lag + half;
            if lag_b >= self.grain_len {
                lag_b -= self.grain_len;
            }

            let out = self.read(lag_a) * self.window(lag_a) + self.read(lag_b) * self.window(lag_b);
            *sample = saturate(out as i32);

            self.lag += 1.0 - self.speed;
            if self.lag >= self.grain_len {
                self.lag -= self.grain_len;
            }
            self.write_pos = (self.write_pos + 1) % len;
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.write_pos = 0;
        self.lag = 0.0;
    }
}
