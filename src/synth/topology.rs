use crate::{
    graph::node::{Inputs, MAX_PORTS},
    io::block::AudioBlock,
    Sample, AUDIO_BLOCK_SAMPLES,
};

/*
Voice Topology
==============

The voice is a fixed graph of unit generators. Nodes are named by `NodeId`,
wires by the static `VOICE_EDGES` table, and evaluation follows
`RENDER_ORDER`, a topological order of the non-feedback edges.

                      ┌─────────── feedback (one block late) ───────────┐
                      ▼                                                 │
  string ──┬──► fm_mixer ──► fm_env ──► sine ───────────────────────────┤
           │       ▲  ▲                                                 │
           │    osc1  osc2                                              ▼
           └──► string_amp ─────────────────────────────────────► voice_mixer
                                                                    ▲    │
  osc1,osc2 ──► interp1 ─┐                                          │    ▼
                         ├──► wave_mixer ───────────────────────────┘  filter ◄── filter_env
  osc3,osc4 ──► interp2 ─┘                                               │             ▲
                                                                         ▼             │
                                            amp_env ◄── filter_attenuation     filter_mod_blend
                                               │                                  ▲        ▲
                                               ▼                       filter_amount   filter_lfo_env
                                             output                                        ▲
                                                                                       filter_lfo
  vibrato_lfo ──► vibrato_reader

The sine feeds back into its own FM mixer. That edge reads the sine's block
from the previous quantum, which breaks the cycle without a second pass.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeId {
    String,
    StringAmp,
    Sine,
    FmMixer,
    Osc1,
    Osc2,
    Osc3,
    Osc4,
    VibratoLfo,
    FilterLfo,
    FilterLfoEnv,
    FilterModBlend,
    VoiceMixer,
    WaveMixer,
    Filter,
    FilterEnv,
    AmpEnv,
    FmEnv,
    FilterAmount,
    Interp1,
    Interp2,
    FilterAttenuation,
    VibratoReader,
}

impl NodeId {
    pub const COUNT: usize = 23;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Voice mixer ports.
pub const MIX_STRING: usize = 0;
pub const MIX_SINE: usize = 1;
pub const MIX_WAVETABLE: usize = 2;

/// FM mixer ports.
pub const FM_STRING: usize = 0;
pub const FM_SINE: usize = 1;
pub const FM_OSC1: usize = 2;
pub const FM_OSC2: usize = 3;

/// Filter ports.
pub const FILTER_AUDIO: usize = 0;
pub const FILTER_CUTOFF: usize = 1;

#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub port: usize,
    /// Read the source's block from the previous quantum.
    pub feedback: bool,
}

const fn wire(from: NodeId, to: NodeId, port: usize) -> Edge {
    Edge {
        from,
        to,
        port,
        feedback: false,
    }
}

const fn feedback(from: NodeId, to: NodeId, port: usize) -> Edge {
    Edge {
        from,
        to,
        port,
        feedback: true,
    }
}

use NodeId::*;

pub const VOICE_EDGES: [Edge; 25] = [
    wire(String, FmMixer, FM_STRING),
    feedback(Sine, FmMixer, FM_SINE),
    wire(Osc1, FmMixer, FM_OSC1),
    wire(Osc2, FmMixer, FM_OSC2),
    wire(FmMixer, FmEnv, 0),
    wire(FmEnv, Sine, 0),
    wire(String, StringAmp, 0),
    wire(StringAmp, VoiceMixer, MIX_STRING),
    wire(Sine, VoiceMixer, MIX_SINE),
    wire(Osc1, Interp1, 0),
    wire(Osc2, Interp1, 1),
    wire(Osc3, Interp2, 0),
    wire(Osc4, Interp2, 1),
    wire(Interp1, WaveMixer, 0),
    wire(Interp2, WaveMixer, 1),
    wire(WaveMixer, VoiceMixer, MIX_WAVETABLE),
    wire(VoiceMixer, Filter, FILTER_AUDIO),
    wire(FilterAmount, FilterModBlend, 0),
    wire(FilterLfo, FilterLfoEnv, 0),
    wire(FilterLfoEnv, FilterModBlend, 1),
    wire(FilterModBlend, FilterEnv, 0),
    wire(FilterEnv, Filter, FILTER_CUTOFF),
    wire(Filter, FilterAttenuation, 0),
    wire(FilterAttenuation, AmpEnv, 0),
    wire(VibratoLfo, VibratoReader, 0),
];

pub const RENDER_ORDER: [NodeId; NodeId::COUNT] = [
    String,
    VibratoLfo,
    FilterLfo,
    FilterAmount,
    Osc1,
    Osc2,
    Osc3,
    Osc4,
    FmMixer,
    FmEnv,
    Sine,
    StringAmp,
    Interp1,
    Interp2,
    WaveMixer,
    VoiceMixer,
    FilterLfoEnv,
    FilterModBlend,
    FilterEnv,
    Filter,
    FilterAttenuation,
    AmpEnv,
    VibratoReader,
];

/// The node whose block is the voice output.
pub const OUTPUT: NodeId = AmpEnv;

/// Blocks kept from the previous quantum for feedback edges.
pub struct FeedbackHistory {
    blocks: Box<[[Sample; AUDIO_BLOCK_SAMPLES]; NodeId::COUNT]>,
    valid: [bool; NodeId::COUNT],
}

impl FeedbackHistory {
    pub fn new() -> Self {
        Self {
            blocks: Box::new([[0; AUDIO_BLOCK_SAMPLES]; NodeId::COUNT]),
            valid: [false; NodeId::COUNT],
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&[Sample]> {
        self.valid[id.index()].then(|| &self.blocks[id.index()][..])
    }

    /// Record this quantum's output of every feedback source.
    pub fn capture(&mut self, outputs: &[Option<AudioBlock>; NodeId::COUNT]) {
        for edge in VOICE_EDGES.iter().filter(|e| e.feedback) {
            let index = edge.from.index();
            match &outputs[index] {
                Some(block) => {
                    self.blocks[index].copy_from_slice(&block[..]);
                    self.valid[index] = true;
                }
                None => self.valid[index] = false,
            }
        }
    }

    pub fn clear(&mut self) {
        self.valid = [false; NodeId::COUNT];
    }
}

impl Default for FeedbackHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the input blocks wired into `id`.
pub fn gather<'a>(
    id: NodeId,
    outputs: &'a [Option<AudioBlock>; NodeId::COUNT],
    history: &'a FeedbackHistory,
) -> Inputs<'a> {
    let mut inputs: Inputs<'a> = [None; MAX_PORTS];
    for edge in VOICE_EDGES.iter().filter(|e| e.to == id) {
        inputs[edge.port] = if edge.feedback {
            history.get(edge.from)
        } else {
            outputs[edge.from.index()].as_deref().map(|block| &block[..])
        };
    }
    inputs
}
