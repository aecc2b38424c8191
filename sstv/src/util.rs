#[inline(always)]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Number of samples a tone of `duration` seconds occupies.
///
/// Rounds to the nearest sample. Zero, negative and NaN durations give 0.
#[inline]
pub fn num_samples(duration: f32, sample_rate: u32) -> usize {
    let samples = (f64::from(duration) * f64::from(sample_rate)).round();
    if samples > 0.0 { samples as usize } else { 0 }
}
