#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::patch::{MacroControl, Parameter, MACRO_COUNT};

/// Every parameter the patch engine can set on the synth.
///
/// Values arrive as 0..=127 controller values; the setters below convert
/// them to engine units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthParam {
    AmpAttack,
    AmpDecay,
    AmpSustain,
    AmpRelease,
    FmAttack,
    FmDecay,
    FmSustain,
    FmRelease,
    StringFm,
    SineFm,
    WavetableFm,
    OctaveControl,
    FilterAttack,
    FilterDecay,
    FilterSustain,
    FilterRelease,
    LfoDelay,
    LfoAttack,
    LfoDecay,
    LfoSustain,
    LfoRelease,
    FilterFrequency,
    FilterResonance,
    FilterEnvelope,
    FilterModBlend,
    LfoAmount,
    LfoRate,
    Vibrato,
    StartWavetable,
    EndWavetable,
    SourceBlend,
    Detune,
    DelayTime,
    DelayFeedback,
    GranularFeedback,
}

/// The instrument's parameter registry: name, target, preferred value,
/// weighting and whether random macro assignment may pick it.
pub fn default_parameters() -> Vec<Parameter<SynthParam>> {
    use SynthParam::*;

    vec![
        Parameter::new("Amp Attack", AmpAttack, 10.0, 0.7, false),
        Parameter::new("Amp Decay", AmpDecay, 40.0, 0.5, false),
        Parameter::new("Amp Sustain", AmpSustain, 100.0, 0.5, false),
        Parameter::new("Amp Release", AmpRelease, 30.0, 0.5, false),
        Parameter::new("FM Attack", FmAttack, 10.0, 0.5, true),
        Parameter::new("FM Decay", FmDecay, 20.0, 0.5, true),
        Parameter::new("FM Sustain", FmSustain, 0.0, 0.5, false),
        Parameter::new("FM Release", FmRelease, 50.0, 0.5, true),
        Parameter::new("String FM", StringFm, 0.0, 0.6, true),
        Parameter::new("Sine FM", SineFm, 0.0, 0.6, true),
        Parameter::new("Wavetable FM", WavetableFm, 0.0, 0.6, true),
        Parameter::new("Octave Control", OctaveControl, 0.0, 1.0, true),
        Parameter::new("Filter Attack", FilterAttack, 25.0, 0.6, true),
        Parameter::new("Filter Decay", FilterDecay, 25.0, 0.6, true),
        Parameter::new("Filter Sustain", FilterSustain, 80.0, 0.7, false),
        Parameter::new("Filter Release", FilterRelease, 25.0, 0.6, true),
        Parameter::new("LFO Delay", LfoDelay, 0.0, 0.6, true),
        Parameter::new("LFO Attack", LfoAttack, 20.0, 0.6, true),
        Parameter::new("LFO Decay", LfoDecay, 20.0, 0.6, true),
        Parameter::new("LFO Sustain", LfoSustain, 50.0, 0.7, true),
        Parameter::new("LFO Release", LfoRelease, 50.0, 0.6, true),
        Parameter::new("Filter Frequency", FilterFrequency, 80.0, 0.7, true),
        Parameter::new("Filter Resonance", FilterResonance, 50.0, 0.8, true),
        Parameter::new("Filter Envelope", FilterEnvelope, 64.0, 0.7, true),
        Parameter::new("Filter Mod Blend", FilterModBlend, 64.0, 0.3, true),
        Parameter::new("LFO Amount", LfoAmount, 60.0, 0.6, true),
        Parameter::new("LFO Rate", LfoRate, 60.0, 0.6, true),
        Parameter::new("Vibrato", Vibrato, 5.0, 0.6, true),
        Parameter::new("Start Wavetable", StartWavetable, 64.0, 0.3, false),
        Parameter::new("End Wavetable", EndWavetable, 64.0, 0.3, false),
        Parameter::new("Blend Three Sources", SourceBlend, 64.0, 0.5, true),
        Parameter::new("Detune", Detune, 10.0, 0.6, true),
        Parameter::new("Delay Time", DelayTime, 60.0, 0.5, true),
        Parameter::new("Delay Feedback", DelayFeedback, 0.0, 0.6, true),
        Parameter::new("Granular Feedback", GranularFeedback, 0.0, 0.6, true),
    ]
}

/// Factory macro bindings.
///
/// Macro one opens up the detune, sine FM and filter; macro two fades the
/// wavetable FM out while sweeping the source blend.
pub fn default_macros(capacity: usize) -> [MacroControl<SynthParam>; MACRO_COUNT] {
    let mut one = MacroControl::with_capacity(capacity);
    one.add_control(SynthParam::Detune, 0.0, 127.0);
    one.add_control(SynthParam::SineFm, 0.0, 127.0);
    one.add_control(SynthParam::FilterFrequency, 60.0, 127.0);

    let mut two = MacroControl::with_capacity(capacity);
    two.add_control(SynthParam::WavetableFm, 127.0, 0.0);
    two.add_control(SynthParam::SourceBlend, 0.0, 127.0);
    two.add_control(SynthParam::SourceBlend, 0.0, 127.0);

    [one, two]
}

/// Envelope stage time: `v^1.7` milliseconds, returned in seconds.
pub fn envelope_seconds(value: f32) -> f32 {
    value.max(0.0).powf(1.7) / 1_000.0
}

pub fn unit(value: f32) -> f32 {
    value / 127.0
}

/// FM mixer gain.
pub fn fm_gain(value: f32) -> f32 {
    value * 0.001
}

/// FM depth of the sine carrier in whole octaves, 0..=8.
pub fn octave_control(value: f32) -> f32 {
    ((value as i32).clamp(0, 127) * 8 / 127) as f32
}

/// Filter cutoff: 20 Hz to 20 kHz, exponential.
pub fn filter_cutoff(value: f32) -> f32 {
    20.0 * 1_000f32.powf(value / 127.0)
}

/// Output gain trimming the resonance peak above 0.7.
pub fn resonance_attenuation(resonance: f32) -> f32 {
    if resonance > 0.7 {
        1.0 - (resonance - 0.7)
    } else {
        1.0
    }
}

/// Filter envelope depth, -1.0..~1.0.
pub fn filter_envelope_amount(value: f32) -> f32 {
    value / 64.0 - 1.0
}

/// Filter LFO rate: 0.1 Hz over three octaves.
pub fn lfo_rate(value: f32) -> f32 {
    0.1 * (value / 127.0 * 3.0).exp2()
}

/// Vibrato LFO `(rate_hz, depth)`.
pub fn vibrato(value: f32) -> (f32, f32) {
    (value / 35.0 + 2.0, value / 70.0)
}

/// Detune ratio between the wavetable pairs, 1.0..=1.005.
pub fn detune_ratio(value: f32) -> f32 {
    1.0 + value / 127.0 * 0.005
}

/// Master delay time in milliseconds: 1 ms over three octaves.
pub fn delay_ms(value: f32) -> f32 {
    (value / 127.0 * 3.0).exp2().min(200.0)
}

/// Feedback return gain, 0.0..=0.8.
pub fn feedback_gain(value: f32) -> f32 {
    value * 0.006_299_212_6
}

/// Voice mixer gains `(string, sine, wavetable)` across the blend control.
///
/// ```text
///   0..=31    string
///  32..=60    string → wavetable
///  61..=90    wavetable
///  91..=127   wavetable → sine
/// ```
pub fn source_blend(value: f32) -> (f32, f32, f32) {
    let value = value.clamp(0.0, 127.0);
    if value <= 31.0 {
        (1.0, 0.0, 0.0)
    } else if value <= 60.0 {
        let t = (value - 31.0) / 29.0;
        (1.0 - t, 0.0, t)
    } else if value <= 90.0 {
        (0.0, 0.0, 1.0)
    } else {
        let t = (value - 90.0) / 37.0;
        (0.0, t, 1.0 - t)
    }
}
