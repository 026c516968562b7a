use rolling_stats::Stats;
use serde::Serialize;

use crate::constants::MIN_NOISE_POWER;
use crate::error::{MlsError, Result};

/// One impulse-response coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tap {
    pub lag: usize,
    pub time_ms: f64,
    pub value: f64,
}

/// Condensed view of an estimated impulse response
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSummary {
    /// Number of lags analysed (P; the padding slot is excluded)
    pub lags: usize,
    pub sample_rate: u32,
    /// Largest-magnitude tap
    pub peak: Tap,
    /// Strongest taps, largest magnitude first
    pub taps: Vec<Tap>,
    /// RMS of every tap outside `taps`
    pub noise_floor_rms: f64,
    pub peak_to_noise_db: f64,
}

impl ResponseSummary {
    /// Summarize a response of P + 1 samples as returned by the estimator
    pub fn from_response(resp: &[f64], sample_rate: u32, taps: usize) -> Result<Self> {
        let lags = resp.len().saturating_sub(1);
        if lags == 0 {
            return Err(MlsError::InvalidData("empty impulse response".to_string()));
        }
        let values = &resp[..lags];
        let to_tap = |lag: usize| Tap {
            lag,
            time_ms: lag as f64 * 1000.0 / sample_rate as f64,
            value: values[lag],
        };

        let mut order: Vec<usize> = (0..lags).collect();
        order.sort_by(|&a, &b| {
            values[b]
                .abs()
                .total_cmp(&values[a].abs())
                .then(a.cmp(&b))
        });
        let strongest = &order[..taps.max(1).min(lags)];

        let mut noise: Stats<f64> = Stats::new();
        for &lag in &order[strongest.len()..] {
            noise.update(values[lag] * values[lag]);
        }
        let noise_power = if noise.count > 0 { noise.mean } else { 0.0 };

        let peak = to_tap(strongest[0]);
        let peak_power = peak.value * peak.value;
        let peak_to_noise_db =
            10.0 * (peak_power.max(MIN_NOISE_POWER) / noise_power.max(MIN_NOISE_POWER)).log10();

        Ok(Self {
            lags,
            sample_rate,
            peak,
            taps: strongest.iter().map(|&lag| to_tap(lag)).collect(),
            noise_floor_rms: noise_power.sqrt(),
            peak_to_noise_db,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_peak_and_taps() {
        let resp = [0.1, 2.0, -0.8, 0.0, 0.4, 0.0];
        let summary = ResponseSummary::from_response(&resp, 1000, 3).unwrap();

        assert_eq!(summary.lags, 5);
        assert_eq!(summary.peak.lag, 1);
        assert_abs_diff_eq!(summary.peak.time_ms, 1.0);
        let lags: Vec<usize> = summary.taps.iter().map(|t| t.lag).collect();
        assert_eq!(lags, vec![1, 2, 4]);
    }

    #[test]
    fn test_noise_floor_excludes_strongest_taps() {
        let resp = [1.0, 0.1, -0.1, 0.1, -0.1, 0.0];
        let summary = ResponseSummary::from_response(&resp, 48_000, 1).unwrap();

        assert_abs_diff_eq!(summary.noise_floor_rms, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.peak_to_noise_db, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ties_resolve_to_earliest_lag() {
        let resp = [0.5, -0.5, 0.5, 0.0];
        let summary = ResponseSummary::from_response(&resp, 8000, 2).unwrap();
        assert_eq!(summary.peak.lag, 0);
        assert_eq!(summary.taps[1].lag, 1);
    }

    #[test]
    fn test_empty_response_rejected() {
        assert!(ResponseSummary::from_response(&[0.0], 48_000, 3).is_err());
    }
}
