#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control events delivered to the synth between blocks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    /// Polyphonic pressure on one note.
    Aftertouch { note: u8, value: u8 },
    /// Global bend, -8192..=8191.
    PitchBend { value: i16 },
    /// Bend for the note on an expression channel.
    ChannelPitchBend { channel: u8, value: i16 },
    /// Pressure for the note on an expression channel.
    ChannelPressure { channel: u8, value: u8 },
    ControlChange { controller: u8, value: u8 },
    /// Drive macro `index` directly with a 0..=127 value.
    Macro { index: usize, value: f32 },
    OctaveOffset { octaves: i32 },
    RandomPatch,
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
