/// A decoded MIDI channel message. Channels are 1-based (1..=16).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    PolyAftertouch { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    /// Signed bend, -8192..=8191 with 0 at rest.
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

/// Channel carrying global messages in an MPE lower zone.
pub const MPE_MASTER_CHANNEL: u8 = 1;

/// Standard controller numbers.
pub mod cc {
    pub const BANK_SELECT: u8 = 0;
    pub const MODULATION_WHEEL: u8 = 1;
    pub const BREATH_CONTROLLER: u8 = 2;
    pub const FOOT_CONTROLLER: u8 = 4;
    pub const PORTAMENTO_TIME: u8 = 5;
    pub const DATA_ENTRY: u8 = 6;
    pub const VOLUME: u8 = 7;
    pub const BALANCE: u8 = 8;
    pub const PAN: u8 = 10;
    pub const EXPRESSION: u8 = 11;
    pub const EFFECT_CONTROL_1: u8 = 12;
    pub const EFFECT_CONTROL_2: u8 = 13;
    pub const GENERAL_PURPOSE_1: u8 = 16;
    pub const GENERAL_PURPOSE_2: u8 = 17;
    pub const GENERAL_PURPOSE_3: u8 = 18;
    pub const GENERAL_PURPOSE_4: u8 = 19;
    pub const SUSTAIN_PEDAL: u8 = 64;
    /// Sound variation.
    pub const SOUND_CONTROLLER_1: u8 = 70;
    /// Timbre / harmonic intensity (filter resonance).
    pub const SOUND_CONTROLLER_2: u8 = 71;
    /// Release time.
    pub const SOUND_CONTROLLER_3: u8 = 72;
    /// Attack time.
    pub const SOUND_CONTROLLER_4: u8 = 73;
    /// Brightness (filter cutoff).
    pub const SOUND_CONTROLLER_5: u8 = 74;
    pub const ALL_SOUND_OFF: u8 = 120;
    pub const RESET_ALL_CONTROLLERS: u8 = 121;
    pub const ALL_NOTES_OFF: u8 = 123;
}
