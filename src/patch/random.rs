use rand::Rng;

/// Lowest controller value.
pub const CONTROL_MIN: i32 = 0;
/// Highest controller value.
pub const CONTROL_MAX: i32 = 127;

/// Draw from `min..=max`, pulled towards `preferred` by `weighting`.
///
/// A uniform candidate is drawn together with an independent uniform "bias"
/// value. The candidate survives only if the bias lands within
/// `(1 − weighting) · range` of the preferred value; otherwise the preferred
/// value itself is returned. Weighting 0.0 is plain uniform, 1.0 always
/// returns `preferred`, and values between lean towards it in proportion.
pub fn weighted_random<R: Rng + ?Sized>(
    rng: &mut R,
    min: i32,
    max: i32,
    preferred: i32,
    weighting: f32,
) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let weighting = if weighting.is_finite() {
        weighting.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let range = (max - min + 1) as f32;

    let candidate = rng.gen_range(min..=max);
    let bias = rng.gen_range(min..=max);

    if (((preferred - bias).abs()) as f32) < (1.0 - weighting) * range {
        candidate
    } else {
        preferred
    }
}

/// [`weighted_random`] over the controller range 0..=127.
pub fn weighted_control<R: Rng + ?Sized>(rng: &mut R, preferred: f32, weighting: f32) -> f32 {
    let preferred = preferred.round().clamp(CONTROL_MIN as f32, CONTROL_MAX as f32) as i32;
    weighted_random(rng, CONTROL_MIN, CONTROL_MAX, preferred, weighting) as f32
}
