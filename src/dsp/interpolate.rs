use crate::{dsp::saturate, Sample};

/// Crossfade two blocks sample by sample: `a·(1 − factor) + b·factor`.
///
/// `factor` is clamped to 0.0..=1.0. Each weighted term is truncated to an
/// integer before summing, so the endpoints reproduce their source exactly.
pub fn crossfade(a: &[Sample], b: &[Sample], factor: f32, out: &mut [Sample]) {
    let factor = factor.clamp(0.0, 1.0);
    let keep = 1.0 - factor;

    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        let mixed = (x as f32 * keep) as i32 + (y as f32 * factor) as i32;
        *o = saturate(mixed);
    }
}
