use crate::error::{MlsError, Result};

/// The five-tap system used to sanity-check the estimator
pub const REFERENCE_TAPS: [f64; 5] = [2.0, 0.4, 0.2, -0.1, -0.8];

/// Linear time-invariant system modelled as an FIR filter
///
/// `respond` treats the input as one period of a periodic excitation and
/// returns the steady-state output, which is what a capture of a looped
/// stimulus contains once the first period has passed.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct LinearSystem {
    pub taps: Vec<f64>,
    #[serde(default)]
    pub delay: usize,
}

impl LinearSystem {
    pub fn new(taps: Vec<f64>, delay: usize) -> Result<Self> {
        if taps.is_empty() {
            return Err(MlsError::InvalidData("system needs at least one tap".to_string()));
        }
        if taps.iter().any(|t| !t.is_finite()) {
            return Err(MlsError::InvalidData("system taps must be finite".to_string()));
        }
        Ok(Self { taps, delay })
    }

    pub fn reference() -> Self {
        Self {
            taps: REFERENCE_TAPS.to_vec(),
            delay: 0,
        }
    }

    /// Impulse response sampled over one period of length `period`
    ///
    /// Taps beyond the period wrap around, matching what a periodic
    /// measurement observes.
    pub fn impulse_response(&self, period: usize) -> Vec<f64> {
        let mut h = vec![0.0; period];
        if period == 0 {
            return h;
        }
        for (k, &tap) in self.taps.iter().enumerate() {
            h[(self.delay + k) % period] += tap;
        }
        h
    }

    /// Circular convolution of one stimulus period with the system
    pub fn respond(&self, stimulus: &[f64]) -> Vec<f64> {
        let period = stimulus.len();
        let h = self.impulse_response(period);
        let active: Vec<(usize, f64)> = h
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(k, &v)| (k, v))
            .collect();

        (0..period)
            .map(|n| {
                active
                    .iter()
                    .map(|&(k, v)| v * stimulus[(n + period - k) % period])
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_system() {
        let system = LinearSystem::new(vec![1.0], 0).unwrap();
        let x = [1.0, -1.0, 1.0, 1.0];
        assert_eq!(system.respond(&x), x.to_vec());
    }

    #[test]
    fn test_delay_rotates_output() {
        let system = LinearSystem::new(vec![1.0], 2).unwrap();
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(system.respond(&x), vec![3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_two_tap_circular() {
        let system = LinearSystem::new(vec![2.0, 0.4], 0).unwrap();
        let y = system.respond(&[1.0, 0.0, 0.0]);
        assert_abs_diff_eq!(y[0], 2.0);
        assert_abs_diff_eq!(y[1], 0.4);
        assert_abs_diff_eq!(y[2], 0.0);
    }

    #[test]
    fn test_impulse_response_wraps() {
        let system = LinearSystem::new(vec![1.0, 0.5, 0.25], 2).unwrap();
        assert_eq!(system.impulse_response(3), vec![0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_rejects_bad_taps() {
        assert!(LinearSystem::new(vec![], 0).is_err());
        assert!(LinearSystem::new(vec![f64::NAN], 0).is_err());
    }
}
