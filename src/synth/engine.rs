use crate::{
    config::{ConfigError, SynthConfig},
    patch::PatchEngine,
    synth::{
        controllers::{ControlRoute, ControllerMap},
        message::{MessageReceiver, SynthMessage},
        params::{default_macros, default_parameters, SynthParam},
        poly::{NoteAssignment, PolySynth},
    },
    Sample, AUDIO_BLOCK_SAMPLES,
};

/// Controller values at or above this count as "on".
const SWITCH_THRESHOLD: u8 = 64;

/// The instrument: voices, patch engine and controller routing behind one
/// event surface.
///
/// Events either arrive through the direct methods or are queued by another
/// thread and drained at the start of every block.
pub struct Synth {
    poly: PolySynth,
    patch: PatchEngine<SynthParam>,
    controllers: ControllerMap,
    receiver: Option<Box<dyn MessageReceiver + Send>>,
    random_switch: bool,
}

impl Synth {
    /// Build the voices, then the patch engine that drives them, and load the
    /// preferred patch.
    pub fn new(config: SynthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let string_seed = match config.seed {
            Some(seed) => (seed ^ (seed >> 32)) as u32,
            None => rand::random(),
        };
        let mut poly = PolySynth::new(
            config.sample_rate,
            config.voice_count,
            config.block_pool_size,
            string_seed,
        );
        poly.set_max_pitch_bend(config.max_pitch_bend);

        let parameters = default_parameters();
        let capacity = parameters.len();
        let mut patch = PatchEngine::new(parameters, config.seed)
            .with_macros(default_macros(capacity))
            .with_macro_parameters(config.macro_parameter_count);
        patch.apply_preferred(&mut poly);

        tracing::debug!(
            voices = config.voice_count,
            sample_rate = config.sample_rate,
            "synth ready"
        );

        Ok(Self {
            poly,
            patch,
            controllers: ControllerMap::default(),
            receiver: None,
            random_switch: false,
        })
    }

    /// Attach a queue drained before each block.
    pub fn with_receiver(mut self, receiver: impl MessageReceiver + Send + 'static) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }

    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => {
                self.note_on(note, velocity);
            }
            SynthMessage::NoteOff { note } => self.poly.note_off(note),
            SynthMessage::Aftertouch { note, value } => self.poly.aftertouch(note, value),
            SynthMessage::PitchBend { value } => self.poly.pitch_bend(value),
            SynthMessage::ChannelPitchBend { channel, value } => {
                self.poly.channel_pitch_bend(channel, value)
            }
            SynthMessage::ChannelPressure { channel, value } => {
                self.poly.channel_pressure(channel, value)
            }
            SynthMessage::ControlChange { controller, value } => {
                self.control_change(controller, value)
            }
            SynthMessage::Macro { index, value } => self.apply_macro(index, value),
            SynthMessage::OctaveOffset { octaves } => self.poly.set_octave_offset(octaves),
            SynthMessage::RandomPatch => self.random_patch(),
            SynthMessage::AllNotesOff => self.poly.all_notes_off(),
        }
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) -> Option<NoteAssignment> {
        self.poly.note_on(note, velocity)
    }

    pub fn note_off(&mut self, note: u8) {
        self.poly.note_off(note);
    }

    /// Route a 0..=127 controller value through the controller map.
    pub fn control_change(&mut self, controller: u8, value: u8) {
        let value = value.min(127);
        let Some(route) = self.controllers.route(controller) else {
            tracing::trace!(controller, "unmapped controller");
            return;
        };

        match route {
            ControlRoute::Parameter(param) => match self.patch.index_of(param) {
                Some(index) => self.patch.set_parameter(index, value as f32, &mut self.poly),
                None => tracing::debug!(?param, "parameter not registered"),
            },
            ControlRoute::Macro(index) => self.apply_macro(index, value as f32),
            ControlRoute::Volume => self.poly.set_volume(value as f32 / 127.0),
            ControlRoute::RandomPatch => {
                let on = value >= SWITCH_THRESHOLD;
                if on && !self.random_switch {
                    self.random_patch();
                }
                self.random_switch = on;
            }
        }
    }

    /// Drive macro `index` with a 0..=127 value.
    pub fn apply_macro(&mut self, index: usize, value: f32) {
        self.patch.apply_macro(index, value, &mut self.poly);
    }

    /// Draw a new value for every parameter and rebind the macros.
    pub fn random_patch(&mut self) {
        self.patch.randomize(&mut self.poly);
    }

    /// Drain queued events, then render one block.
    pub fn render_block(&mut self, out: &mut [Sample; AUDIO_BLOCK_SAMPLES]) {
        while let Some(msg) = self.receiver.as_mut().and_then(|rx| rx.pop()) {
            self.handle_message(msg);
        }
        self.poly.render_block(out);
    }

    pub fn poly(&self) -> &PolySynth {
        &self.poly
    }

    pub fn poly_mut(&mut self) -> &mut PolySynth {
        &mut self.poly
    }

    pub fn patch(&self) -> &PatchEngine<SynthParam> {
        &self.patch
    }

    pub fn controllers_mut(&mut self) -> &mut ControllerMap {
        &mut self.controllers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::midi::cc, synth::params::filter_cutoff};

    fn synth() -> Synth {
        Synth::new(SynthConfig::default().with_voices(4).with_seed(11)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(Synth::new(SynthConfig::default().with_voices(0)).is_err());
    }

    #[test]
    fn preferred_patch_is_loaded() {
        let synth = synth();
        let cutoff = synth.poly().voice(0).unwrap().nodes().filter.cutoff();
        assert!((cutoff - filter_cutoff(80.0)).abs() < 1e-2);
    }

    #[test]
    fn controller_reaches_parameter() {
        let mut synth = synth();
        synth.control_change(cc::SOUND_CONTROLLER_5, 0);
        let cutoff = synth.poly().voice(2).unwrap().nodes().filter.cutoff();
        assert!((cutoff - 20.0).abs() < 1e-3);

        let index = synth.patch().index_of(SynthParam::FilterFrequency).unwrap();
        assert_eq!(synth.patch().parameters()[index].current, 0.0);
    }

    #[test]
    fn mod_wheel_drives_first_macro() {
        let mut synth = synth();
        synth.control_change(cc::MODULATION_WHEEL, 127);
        let voice = synth.poly().voice(0).unwrap();
        assert!((voice.pitch().detune - 1.005).abs() < 1e-6);
        assert!((voice.nodes().filter.cutoff() - 20_000.0).abs() < 1.0);
    }

    #[test]
    fn random_patch_switch_fires_once_per_press() {
        let mut synth = synth();
        synth.control_change(cc::GENERAL_PURPOSE_1, 127);
        let after_first = synth.patch().macro_control(0).unwrap().bindings().to_vec();
        assert_eq!(after_first.len(), 2);

        // Held switch: no second patch, bindings untouched.
        synth.control_change(cc::GENERAL_PURPOSE_1, 100);
        assert_eq!(synth.patch().macro_control(0).unwrap().bindings(), &after_first[..]);
    }

    #[test]
    fn volume_controller_scales_bus() {
        let mut synth = synth();
        synth.control_change(cc::VOLUME, 0);
        assert_eq!(synth.poly().bus().volume(), 0.0);
    }

    #[test]
    fn messages_dispatch_like_direct_calls() {
        let mut synth = synth();
        synth.handle_message(SynthMessage::NoteOn {
            note: 60,
            velocity: 100,
        });
        assert_eq!(synth.poly().voice_pool().lookup(60), Some(0));
        synth.handle_message(SynthMessage::AllNotesOff);
        assert_eq!(synth.poly().voice_pool().lookup(60), None);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn queued_messages_drain_before_render() {
        let (mut tx, rx) = rtrb::RingBuffer::new(8);
        let mut synth = synth().with_receiver(rx);
        tx.push(SynthMessage::NoteOn {
            note: 64,
            velocity: 100,
        })
        .unwrap();

        let mut out = [0; AUDIO_BLOCK_SAMPLES];
        synth.render_block(&mut out);
        assert_eq!(synth.poly().voice_pool().lookup(64), Some(0));
    }
}
