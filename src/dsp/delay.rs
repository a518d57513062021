use crate::Sample;

/// Circular delay line of fixed capacity.
pub struct DelayLine {
    buffer: Vec<Sample>,
    write_pos: usize,
}

impl DelayLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity.max(1)],
            write_pos: 0,
        }
    }

    /// Write `sample` and return the one written `delay_samples` ago.
    pub fn next_sample(&mut self, sample: Sample, delay_samples: usize) -> Sample {
        let len = self.buffer.len();
        let delay_samples = delay_samples.min(len - 1);

        self.buffer[self.write_pos] = sample;

        let read_pos = (self.write_pos + len - delay_samples) % len;

        let delayed = self.buffer[read_pos];

        self.write_pos = (self.write_pos + 1) % len;

        delayed
    }

    pub fn render(&mut self, buffer: &mut [Sample], delay_samples: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_comes_back_after_delay() {
        let mut line = DelayLine::new(64);
        let mut buffer = [0; 32];
        buffer[0] = 1000;
        line.render(&mut buffer, 10);
        assert_eq!(buffer[10], 1000);
        assert_eq!(buffer.iter().filter(|&&s| s != 0).count(), 1);
    }

    #[test]
    fn delay_is_clamped_to_capacity() {
        let mut line = DelayLine::new(8);
        assert_eq!(line.next_sample(5, 100), 0);
        for _ in 0..6 {
            line.next_sample(0, 100);
        }
        assert_eq!(line.next_sample(0, 100), 5);
    }
}
