use crate::{
    dsp::{rng::ParkMiller, wavetable::WavetableBank},
    graph::Modulatable,
    io::{block::BlockPool, converter::midi_note_to_freq},
    synth::{
        allocator::{ChannelAllocator, ResourcePool},
        bus::MasterBus,
        params::{self, SynthParam},
        voice::{Voice, VoiceState},
    },
    Sample, AUDIO_BLOCK_SAMPLES,
};

/// Per-voice gain into the master bus.
const VOICE_GAIN: f32 = 0.2;
/// Largest accepted pitch-bend range, in semitones.
pub const MAX_PITCH_BEND_SEMITONES: f32 = 24.0;

/// Where a note-on landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteAssignment {
    pub voice: usize,
    pub channel: u8,
}

/// Mix gain for one voice, fixed by how many voices the synth was built with.
fn voice_gain(voice_count: usize) -> f32 {
    match voice_count {
        0..=4 => VOICE_GAIN,
        5..=20 => VOICE_GAIN * 0.5,
        _ => VOICE_GAIN * 0.25,
    }
}

/// Fixed bank of voices plus the note bookkeeping around them.
pub struct PolySynth {
    voices: Vec<Voice>,
    voice_pool: ResourcePool<u8>,
    channels: ChannelAllocator,
    bus: MasterBus,
    blocks: BlockPool,
    wavetables: WavetableBank,
    max_pitch_bend: f32,
    pitch_bend_ratio: f32,
    octave_offset: i32,
    most_recent: Option<usize>,
    gain: f32,
    mix: [i32; AUDIO_BLOCK_SAMPLES],
}

impl PolySynth {
    /// Build every voice up front. Each string gets its own noise seed,
    /// drawn from a generator started at `seed`.
    pub fn new(sample_rate: f32, voice_count: usize, block_pool_size: usize, seed: u32) -> Self {
        let voice_count = voice_count.max(1);
        let mut seeds = ParkMiller::new(seed);
        let voices = (0..voice_count)
            .map(|_| Voice::new(sample_rate, seeds.next_u32()))
            .collect();

        Self {
            voices,
            voice_pool: ResourcePool::new(voice_count),
            channels: ChannelAllocator::new(),
            bus: MasterBus::new(sample_rate),
            blocks: BlockPool::new(block_pool_size),
            wavetables: WavetableBank::generate(),
            max_pitch_bend: 2.0,
            pitch_bend_ratio: 1.0,
            octave_offset: 0,
            most_recent: None,
            gain: voice_gain(voice_count),
            mix: [0; AUDIO_BLOCK_SAMPLES],
        }
    }

    /// Start `note` on a voice. Velocity zero is a note-off.
    pub fn note_on(&mut self, note: u8, velocity: u8) -> Option<NoteAssignment> {
        if velocity == 0 {
            self.note_off(note);
            return None;
        }

        let voices = &self.voices;
        let index = self
            .voice_pool
            .assign_preferring(note, |i| !voices[i].is_active());
        let channel = self.channels.assign(note);
        let stamp = self.voice_pool.stamp(index);

        let voice = &mut self.voices[index];
        voice.set_octave_offset(self.octave_offset);
        voice.note_on(note, midi_note_to_freq(note), velocity, stamp);
        if self.pitch_bend_ratio != 1.0 {
            voice.apply_pitch_bend(self.pitch_bend_ratio);
        }
        self.most_recent = Some(index);

        tracing::trace!(note, velocity, voice = index, channel, "note on");
        Some(NoteAssignment {
            voice: index,
            channel,
        })
    }

    /// Release every voice holding `note`.
    pub fn note_off(&mut self, note: u8) {
        while let Some(index) = self.voice_pool.release(note) {
            self.voices[index].note_off();
            if self.most_recent == Some(index) {
                self.most_recent = None;
            }
        }
        while self.channels.release(note).is_some() {}
    }

    /// Polyphonic pressure morphs the wavetables of that note's voice.
    pub fn aftertouch(&mut self, note: u8, value: u8) {
        if let Some(index) = self.voice_pool.lookup(note) {
            self.voices[index].wavetable_morph(value as f32 / 127.0);
        }
    }

    /// Global bend, -8192..=8191. Retunes the most recent voice and is
    /// folded into later note-ons.
    pub fn pitch_bend(&mut self, value: i16) {
        self.pitch_bend_ratio = self.bend_ratio(value);
        if let Some(index) = self.most_recent {
            self.voices[index].apply_pitch_bend(self.pitch_bend_ratio);
        }
    }

    /// Bend only the note playing on an expression channel.
    pub fn channel_pitch_bend(&mut self, channel: u8, value: i16) {
        let ratio = self.bend_ratio(value);
        if let Some(index) = self.voice_on_channel(channel) {
            self.voices[index].apply_pitch_bend(ratio);
        }
    }

    pub fn channel_pressure(&mut self, channel: u8, value: u8) {
        if let Some(index) = self.voice_on_channel(channel) {
            self.voices[index].wavetable_morph(value as f32 / 127.0);
        }
    }

    fn voice_on_channel(&self, channel: u8) -> Option<usize> {
        let note = self.channels.note_on_channel(channel)?;
        self.voice_pool.lookup(note)
    }

    fn bend_ratio(&self, value: i16) -> f32 {
        let semitones = value as f32 / 8192.0 * self.max_pitch_bend;
        (semitones / 12.0).exp2()
    }

    pub fn all_notes_off(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.note_off();
        }
        self.voice_pool.clear();
        self.channels.clear();
        self.most_recent = None;
    }

    pub fn set_octave_offset(&mut self, octaves: i32) {
        self.octave_offset = octaves.clamp(-8, 8);
        for voice in self.voices.iter_mut() {
            voice.set_octave_offset(self.octave_offset);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.bus.set_volume(volume);
    }

    /// Bend range in semitones, clamped to 0..=24.
    pub fn set_max_pitch_bend(&mut self, semitones: f32) {
        self.max_pitch_bend = semitones.clamp(0.0, MAX_PITCH_BEND_SEMITONES);
    }

    /// Render every sounding voice and run the sum through the master bus.
    pub fn render_block(&mut self, out: &mut [Sample; AUDIO_BLOCK_SAMPLES]) {
        self.mix.fill(0);
        let gain = self.gain;

        for voice in self.voices.iter_mut() {
            if voice.state() == VoiceState::Free {
                continue;
            }
            let Some(block) = voice.render(&mut self.blocks) else {
                continue;
            };
            for (acc, &sample) in self.mix.iter_mut().zip(block.iter()) {
                *acc += (sample as f32 * gain) as i32;
            }
            self.blocks.release(block);
        }

        self.bus.process(&self.mix, out);
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn voice(&self, index: usize) -> Option<&Voice> {
        self.voices.get(index)
    }

    pub fn voice_pool(&self) -> &ResourcePool<u8> {
        &self.voice_pool
    }

    pub fn channels(&self) -> &ChannelAllocator {
        &self.channels
    }

    pub fn bus(&self) -> &MasterBus {
        &self.bus
    }

    pub fn blocks(&self) -> &BlockPool {
        &self.blocks
    }

    pub fn most_recent(&self) -> Option<usize> {
        self.most_recent
    }

    pub fn pitch_bend_ratio(&self) -> f32 {
        self.pitch_bend_ratio
    }

    pub fn voice_gain(&self) -> f32 {
        self.gain
    }

    pub fn max_pitch_bend(&self) -> f32 {
        self.max_pitch_bend
    }

    pub fn octave_offset(&self) -> i32 {
        self.octave_offset
    }
}

impl Modulatable for PolySynth {
    type Param = SynthParam;

    fn set_param(&mut self, param: SynthParam, value: f32) {
        use SynthParam::*;

        let time = params::envelope_seconds(value);
        let level = params::unit(value);

        match param {
            DelayTime => {
                self.bus.set_delay_ms(params::delay_ms(value));
                return;
            }
            DelayFeedback => {
                self.bus.set_delay_feedback(params::feedback_gain(value));
                return;
            }
            GranularFeedback => {
                self.bus.set_granular_feedback(params::feedback_gain(value));
                return;
            }
            StartWavetable | EndWavetable => {
                let table = self.wavetables.select(value);
                for voice in self.voices.iter_mut() {
                    if param == StartWavetable {
                        voice.set_start_table(&table);
                    } else {
                        voice.set_end_table(&table);
                    }
                }
                return;
            }
            _ => {}
        }

        for voice in self.voices.iter_mut() {
            match param {
                Vibrato => {
                    if value <= 0.0 {
                        voice.vibrato_off();
                    } else {
                        let (rate, depth) = params::vibrato(value);
                        let lfo = &mut voice.nodes_mut().vibrato_lfo;
                        lfo.set_frequency(rate);
                        lfo.set_amplitude(depth);
                        voice.vibrato_on();
                    }
                    continue;
                }
                Detune => {
                    voice.apply_detune(params::detune_ratio(value));
                    continue;
                }
                _ => {}
            }

            let nodes = voice.nodes_mut();
            match param {
                AmpAttack => nodes.amp_env.set_attack(time),
                AmpDecay => nodes.amp_env.set_decay(time),
                AmpSustain => nodes.amp_env.set_sustain(level),
                AmpRelease => nodes.amp_env.set_release(time),
                FmAttack => nodes.fm_env.set_attack(time),
                FmDecay => nodes.fm_env.set_decay(time),
                FmSustain => nodes.fm_env.set_sustain(level),
                FmRelease => nodes.fm_env.set_release(time),
                StringFm => nodes.fm_mixer.set_gain(0, params::fm_gain(value)),
                SineFm => nodes.fm_mixer.set_gain(1, params::fm_gain(value)),
                WavetableFm => {
                    nodes.fm_mixer.set_gain(2, params::fm_gain(value));
                    nodes.fm_mixer.set_gain(3, params::fm_gain(value));
                }
                OctaveControl => nodes.sine.set_fm_octaves(params::octave_control(value)),
                FilterAttack => nodes.filter_env.set_attack(time),
                FilterDecay => nodes.filter_env.set_decay(time),
                FilterSustain => nodes.filter_env.set_sustain(level),
                FilterRelease => nodes.filter_env.set_release(time),
                LfoDelay => nodes.filter_lfo_env.set_delay(time),
                LfoAttack => nodes.filter_lfo_env.set_attack(time),
                LfoDecay => nodes.filter_lfo_env.set_decay(time),
                LfoSustain => nodes.filter_lfo_env.set_sustain(level),
                LfoRelease => nodes.filter_lfo_env.set_release(time),
                FilterFrequency => nodes.filter.set_cutoff(params::filter_cutoff(value)),
                FilterResonance => {
                    nodes.filter.set_resonance(level);
                    let resonance = nodes.filter.resonance();
                    nodes
                        .filter_attenuation
                        .set_gain(params::resonance_attenuation(resonance));
                }
                FilterEnvelope => nodes
                    .filter_amount
                    .set_level(params::filter_envelope_amount(value)),
                FilterModBlend => {
                    nodes.filter_mod_blend.set_gain(0, level);
                    nodes.filter_mod_blend.set_gain(1, 1.0 - level);
                }
                LfoAmount => nodes.filter_lfo.set_amplitude(level),
                LfoRate => nodes.filter_lfo.set_frequency(params::lfo_rate(value)),
                SourceBlend => {
                    let (string, sine, wavetable) = params::source_blend(value);
                    nodes.voice_mixer.set_gain(0, string);
                    nodes.voice_mixer.set_gain(1, sine);
                    nodes.voice_mixer.set_gain(2, wavetable);
                }
                Vibrato | Detune | StartWavetable | EndWavetable | DelayTime | DelayFeedback
                | GranularFeedback => {}
            }
        }
    }
}
