use crate::{
    io::midi::{cc, MidiEvent, MPE_MASTER_CHANNEL},
    synth::message::SynthMessage,
};

/// Translate a MIDI event into a synth message.
///
/// Notes are accepted on every channel (MPE member channels included). Pitch
/// bend and channel pressure on the master channel apply globally; on member
/// channels they address the note sounding on that channel.
pub fn midi_to_synth(midi: MidiEvent) -> Option<SynthMessage> {
    match midi {
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthMessage::NoteOff { note: key }),
        MidiEvent::PolyAftertouch { key, pressure, .. } => Some(SynthMessage::Aftertouch {
            note: key,
            value: pressure,
        }),
        MidiEvent::ControlChange {
            controller: cc::ALL_NOTES_OFF | cc::ALL_SOUND_OFF,
            ..
        } => Some(SynthMessage::AllNotesOff),
        MidiEvent::ControlChange {
            controller, value, ..
        } => Some(SynthMessage::ControlChange { controller, value }),
        MidiEvent::PitchBend { channel, value } if channel == MPE_MASTER_CHANNEL => {
            Some(SynthMessage::PitchBend { value })
        }
        MidiEvent::PitchBend { channel, value } => {
            Some(SynthMessage::ChannelPitchBend { channel, value })
        }
        MidiEvent::ChannelPressure { channel, .. } if channel == MPE_MASTER_CHANNEL => None,
        MidiEvent::ChannelPressure { channel, pressure } => {
            Some(SynthMessage::ChannelPressure {
                channel,
                value: pressure,
            })
        }
        MidiEvent::ProgramChange { .. } => None,
    }
}

/// Equal-tempered frequency of a MIDI note, A4 (69) = 440 Hz.
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
