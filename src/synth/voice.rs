use std::sync::Arc;

use crate::{
    dsp::{
        envelope::Envelope, filter::SVFilter, oscillator::OscillatorBlock, pluck::PluckedString,
        wavetable::Wavetable,
    },
    graph::{Amplifier, BlockReader, Crossfade, Dc, GraphNode, Mixer, RenderCtx},
    io::block::{AudioBlock, BlockPool},
    synth::topology::{self, FeedbackHistory, NodeId, RENDER_ORDER},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Never played, or fully decayed
    Active,    // Gate high
    Releasing, // Gate low, envelope still ringing
}

/// Multipliers that combine into the oscillator frequencies.
///
/// `base · 2^octave_offset · vibrato · pitch_bend` is the centre pitch; the
/// wavetable pairs sit `detune` below and above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchParams {
    pub base_frequency: f32,
    pub detune: f32,
    pub octave_offset: i32,
    pub vibrato: f32,
    pub pitch_bend: f32,
}

impl Default for PitchParams {
    fn default() -> Self {
        Self {
            base_frequency: 0.0,
            detune: 1.0,
            octave_offset: 0,
            vibrato: 1.0,
            pitch_bend: 1.0,
        }
    }
}

impl PitchParams {
    pub fn centre(&self) -> f32 {
        self.base_frequency * (self.octave_offset as f32).exp2() * self.vibrato * self.pitch_bend
    }
}

/// Every unit generator in one voice.
pub struct VoiceNodes {
    pub string: PluckedString,
    pub string_amp: Amplifier,
    pub sine: OscillatorBlock,
    pub fm_mixer: Mixer,
    pub fm_env: Envelope,
    pub osc: [OscillatorBlock; 4],
    pub interp: [Crossfade; 2],
    pub wave_mixer: Mixer,
    pub voice_mixer: Mixer,
    pub vibrato_lfo: OscillatorBlock,
    pub vibrato_reader: BlockReader,
    pub filter_lfo: OscillatorBlock,
    pub filter_lfo_env: Envelope,
    pub filter_amount: Dc,
    pub filter_mod_blend: Mixer,
    pub filter_env: Envelope,
    pub filter: SVFilter,
    pub filter_attenuation: Amplifier,
    pub amp_env: Envelope,
}

impl VoiceNodes {
    fn new(sample_rate: f32, seed: u32) -> Self {
        let mut sine = OscillatorBlock::sine();
        sine.set_frequency(1.0);
        sine.set_fm_octaves(1.0);

        let osc = std::array::from_fn(|_| {
            let mut osc = OscillatorBlock::arbitrary();
            osc.set_fm_octaves(1.0);
            osc
        });

        let mut vibrato_lfo = OscillatorBlock::triangle();
        vibrato_lfo.set_frequency(2.0);
        let mut filter_lfo = OscillatorBlock::triangle();
        filter_lfo.set_frequency(10.0);
        filter_lfo.set_amplitude(0.0);
        let mut filter = SVFilter::lowpass(1_000.0);
        filter.set_octave_control(FILTER_MOD_OCTAVES);

        Self {
            string: PluckedString::with_seed(sample_rate, seed),
            string_amp: Amplifier::new(1.0),
            sine,
            fm_mixer: Mixer::with_gains([0.0; 4]),
            fm_env: Envelope::new(),
            osc,
            interp: [Crossfade::new(), Crossfade::new()],
            wave_mixer: Mixer::with_gains([0.5, 0.5, 0.0, 0.0]),
            voice_mixer: Mixer::with_gains([0.0; 4]),
            vibrato_lfo,
            vibrato_reader: BlockReader::new(),
            filter_lfo,
            filter_lfo_env: Envelope::new(),
            filter_amount: Dc::new(0.0),
            filter_mod_blend: Mixer::new(),
            filter_env: Envelope::new(),
            filter,
            filter_attenuation: Amplifier::new(1.0),
            amp_env: Envelope::new(),
        }
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut dyn GraphNode {
        match id {
            NodeId::String => &mut self.string,
            NodeId::StringAmp => &mut self.string_amp,
            NodeId::Sine => &mut self.sine,
            NodeId::FmMixer => &mut self.fm_mixer,
            NodeId::Osc1 => &mut self.osc[0],
            NodeId::Osc2 => &mut self.osc[1],
            NodeId::Osc3 => &mut self.osc[2],
            NodeId::Osc4 => &mut self.osc[3],
            NodeId::VibratoLfo => &mut self.vibrato_lfo,
            NodeId::FilterLfo => &mut self.filter_lfo,
            NodeId::FilterLfoEnv => &mut self.filter_lfo_env,
            NodeId::FilterModBlend => &mut self.filter_mod_blend,
            NodeId::VoiceMixer => &mut self.voice_mixer,
            NodeId::WaveMixer => &mut self.wave_mixer,
            NodeId::Filter => &mut self.filter,
            NodeId::FilterEnv => &mut self.filter_env,
            NodeId::AmpEnv => &mut self.amp_env,
            NodeId::FmEnv => &mut self.fm_env,
            NodeId::FilterAmount => &mut self.filter_amount,
            NodeId::Interp1 => &mut self.interp[0],
            NodeId::Interp2 => &mut self.interp[1],
            NodeId::FilterAttenuation => &mut self.filter_attenuation,
            NodeId::VibratoReader => &mut self.vibrato_reader,
        }
    }

    fn envelopes_mut(&mut self) -> [&mut Envelope; 4] {
        [
            &mut self.amp_env,
            &mut self.filter_env,
            &mut self.fm_env,
            &mut self.filter_lfo_env,
        ]
    }
}

/// Cutoff sweep at full filter envelope depth.
const FILTER_MOD_OCTAVES: f32 = 7.0;

/// The vibrato reader's block average is divided by this before use.
const VIBRATO_DIVISOR: f32 = 1_000_000.0;

/// One synthesis voice: a plucked string, a sine FM pair and four morphing
/// wavetable oscillators through a modulated low-pass filter.
pub struct Voice {
    nodes: VoiceNodes,
    history: FeedbackHistory,
    pitch: PitchParams,
    vibrato_enabled: bool,
    state: VoiceState,
    note: Option<u8>,
    age: u64,
    ctx: RenderCtx,
}

impl Voice {
    pub fn new(sample_rate: f32, seed: u32) -> Self {
        Self {
            nodes: VoiceNodes::new(sample_rate, seed),
            history: FeedbackHistory::new(),
            pitch: PitchParams::default(),
            vibrato_enabled: false,
            state: VoiceState::Free,
            note: None,
            age: 0,
            ctx: RenderCtx::new(sample_rate),
        }
    }

    /// Gate the voice. Re-gates every envelope and re-plucks the string, so
    /// a stolen voice starts cleanly on the next render.
    pub fn note_on(&mut self, note: u8, frequency: f32, velocity: u8, age: u64) {
        let amplitude = velocity.min(127) as f32 / 127.0;

        self.note = Some(note);
        self.age = age;
        self.state = VoiceState::Active;
        self.pitch.base_frequency = frequency;
        self.pitch.pitch_bend = 1.0;

        let centre = self.pitch.centre();
        let nodes = &mut self.nodes;
        nodes.string.note_on(centre, 1.0);
        nodes.string_amp.set_gain(amplitude);
        nodes.sine.set_amplitude(amplitude);
        for osc in nodes.osc.iter_mut() {
            osc.set_amplitude(amplitude);
        }
        self.update_frequencies();

        let ctx = self.ctx;
        for env in self.nodes.envelopes_mut() {
            env.note_on(&ctx);
        }
    }

    /// Release every envelope. The voice keeps sounding until they finish.
    pub fn note_off(&mut self) {
        if self.state != VoiceState::Active {
            return;
        }
        self.state = VoiceState::Releasing;
        let ctx = self.ctx;
        for env in self.nodes.envelopes_mut() {
            env.note_off(&ctx);
        }
    }

    /// Recompute every oscillator frequency from the pitch multipliers.
    pub fn update_frequencies(&mut self) {
        let centre = self.pitch.centre();
        let below = centre / self.pitch.detune;
        let above = centre * self.pitch.detune;

        let nodes = &mut self.nodes;
        nodes.osc[0].set_frequency(below);
        nodes.osc[1].set_frequency(below);
        nodes.osc[2].set_frequency(above);
        nodes.osc[3].set_frequency(above);
        nodes.sine.set_frequency(centre);
        nodes.string.set_pitch(centre);
    }

    pub fn apply_pitch_bend(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.pitch.pitch_bend = ratio;
            self.update_frequencies();
        }
    }

    pub fn apply_detune(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.pitch.detune = ratio;
            self.update_frequencies();
        }
    }

    pub fn set_octave_offset(&mut self, octaves: i32) {
        self.pitch.octave_offset = octaves.clamp(-8, 8);
        self.update_frequencies();
    }

    pub fn vibrato_on(&mut self) {
        self.vibrato_enabled = true;
        self.update_vibrato();
    }

    pub fn vibrato_off(&mut self) {
        self.vibrato_enabled = false;
        self.pitch.vibrato = 1.0;
        self.update_frequencies();
    }

    /// Fold the vibrato LFO's latest block average into the pitch.
    pub fn update_vibrato(&mut self) {
        self.pitch.vibrato = 1.0 + self.nodes.vibrato_reader.value() as f32 / VIBRATO_DIVISOR;
        self.update_frequencies();
    }

    /// Crossfade each wavetable pair towards its second table (0.0..=1.0).
    pub fn wavetable_morph(&mut self, amount: f32) {
        for interp in self.nodes.interp.iter_mut() {
            interp.set_factor(amount);
        }
    }

    pub fn set_start_table(&mut self, table: &Arc<Wavetable>) {
        self.nodes.osc[0].set_table(Arc::clone(table));
        self.nodes.osc[2].set_table(Arc::clone(table));
    }

    pub fn set_end_table(&mut self, table: &Arc<Wavetable>) {
        self.nodes.osc[1].set_table(Arc::clone(table));
        self.nodes.osc[3].set_table(Arc::clone(table));
    }

    /// Evaluate the graph for one quantum and return the voice output.
    ///
    /// Every intermediate block goes back to `pool` before returning.
    pub fn render(&mut self, pool: &mut BlockPool) -> Option<AudioBlock> {
        let mut outputs: [Option<AudioBlock>; NodeId::COUNT] = std::array::from_fn(|_| None);

        for &id in RENDER_ORDER.iter() {
            let inputs = topology::gather(id, &outputs, &self.history);
            let block = self.nodes.node_mut(id).update(&inputs, pool, &self.ctx);
            outputs[id.index()] = block;
        }

        self.history.capture(&outputs);
        let out = outputs[topology::OUTPUT.index()].take();
        for block in outputs.into_iter().flatten() {
            pool.release(block);
        }

        if self.vibrato_enabled {
            self.update_vibrato();
        }
        if self.state == VoiceState::Releasing && !self.nodes.amp_env.is_active() {
            self.free();
        }

        out
    }

    fn free(&mut self) {
        self.state = VoiceState::Free;
        self.history.clear();
        self.nodes.string.note_off();
    }

    /// True while the amplitude envelope is running.
    pub fn is_active(&self) -> bool {
        self.nodes.amp_env.is_active()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn note(&self) -> Option<u8> {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn pitch(&self) -> &PitchParams {
        &self.pitch
    }

    pub fn vibrato_enabled(&self) -> bool {
        self.vibrato_enabled
    }

    pub fn nodes(&self) -> &VoiceNodes {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut VoiceNodes {
        &mut self.nodes
    }
}
