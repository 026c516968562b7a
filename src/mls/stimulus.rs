/// Map MLS bits to a bipolar excitation: `true` -> -1, `false` -> +1
pub fn to_bipolar(bits: &[bool]) -> Vec<f64> {
    to_bipolar_scaled(bits, 1.0)
}

/// Bipolar excitation with a peak amplitude, for playback headroom
pub fn to_bipolar_scaled(bits: &[bool], amplitude: f64) -> Vec<f64> {
    bits.iter()
        .map(|&bit| amplitude * (1.0 - 2.0 * bit as u8 as f64))
        .collect()
}

/// Concatenate whole periods of a stimulus
///
/// Playing more than one period lets the system under test reach steady
/// state before the captured period begins.
pub fn repeat_periods(stimulus: &[f64], periods: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(stimulus.len() * periods);
    for _ in 0..periods {
        out.extend_from_slice(stimulus);
    }
    out
}
