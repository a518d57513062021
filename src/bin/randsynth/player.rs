use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Stream,
};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::{Producer, RingBuffer};

use randsynth::{synth::message::SynthMessage, Sample, Synth, SynthConfig, AUDIO_BLOCK_SAMPLES};

/// Control events that can be queued between two audio callbacks.
const QUEUE_CAPACITY: usize = 256;

/// Keeps the output stream alive; dropping it stops playback.
pub struct Player {
    _stream: Stream,
    sample_rate: f32,
}

impl Player {
    /// Open the default output device and start rendering. Events pushed
    /// on the returned producer reach the synth before its next block.
    pub fn start(config: SynthConfig) -> EyreResult<(Self, Producer<SynthMessage>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;

        let (tx, rx) = RingBuffer::new(QUEUE_CAPACITY);
        let mut synth = Synth::new(config.with_sample_rate(sample_rate))
            .wrap_err("invalid synth config")?
            .with_receiver(rx);

        // The synth renders whole blocks; the device asks for arbitrary
        // frame counts, so keep the unread tail of the last block.
        let mut block = [0 as Sample; AUDIO_BLOCK_SAMPLES];
        let mut read = AUDIO_BLOCK_SAMPLES;

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    if read == AUDIO_BLOCK_SAMPLES {
                        synth.render_block(&mut block);
                        read = 0;
                    }
                    let sample = block[read] as f32 / 32_768.0;
                    read += 1;
                    frame.fill(sample);
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        Ok((
            Self {
                _stream: stream,
                sample_rate,
            },
            tx,
        ))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
