//! Conditioning of raw captures before deconvolution
//!
//! The estimator needs exactly one period of samples aligned with the
//! stimulus. These helpers turn repeated, padded recordings into that
//! shape; they run outside the deconvolution pipeline.

use crate::error::{MlsError, Result};

/// Element-wise mean of repeated captures
///
/// Captures of unequal length are averaged over their common prefix.
pub fn average_captures<C: AsRef<[f64]>>(captures: &[C]) -> Result<Vec<f64>> {
    let shortest = captures
        .iter()
        .map(|c| c.as_ref().len())
        .min()
        .ok_or_else(|| MlsError::InvalidData("no captures to average".to_string()))?;

    let longest = captures.iter().map(|c| c.as_ref().len()).max().unwrap_or(0);
    if longest != shortest {
        log::warn!(
            "Capture lengths differ ({} to {} samples), averaging the first {}",
            shortest,
            longest,
            shortest
        );
    }

    let mut mean = vec![0.0; shortest];
    for capture in captures {
        for (acc, &x) in mean.iter_mut().zip(capture.as_ref()) {
            *acc += x;
        }
    }
    let scale = 1.0 / captures.len() as f64;
    for acc in mean.iter_mut() {
        *acc *= scale;
    }
    Ok(mean)
}

/// Strip the silent lead-in and tail around a played-back stimulus
///
/// Keeps everything from the first to the last sample whose magnitude
/// exceeds `threshold`. Quiet samples between them are kept so the
/// period alignment is preserved. An all-silent capture gates to empty.
pub fn gate_silence(samples: &[f64], threshold: f64) -> Vec<f64> {
    let loud = |x: &f64| x.abs() > threshold;
    let gated = match (samples.iter().position(loud), samples.iter().rposition(loud)) {
        (Some(first), Some(last)) => samples[first..=last].to_vec(),
        _ => Vec::new(),
    };
    log::debug!(
        "Gate at {} kept {} of {} samples",
        threshold,
        gated.len(),
        samples.len()
    );
    gated
}

/// Exactly `period` samples starting at `offset`
pub fn align_to_period(samples: &[f64], offset: usize, period: usize) -> Result<Vec<f64>> {
    let available = samples.len().saturating_sub(offset);
    if available < period {
        return Err(MlsError::LengthMismatch {
            expected: period,
            actual: available,
        });
    }
    if available > period {
        log::debug!(
            "Discarding {} samples after the aligned period",
            available - period
        );
    }
    Ok(samples[offset..offset + period].to_vec())
}
