use std::sync::Arc;

use super::{TagTables, fast_hadamard_transform, permute_response, permute_signal};
use crate::error::{MlsError, Result};
use crate::mls::MlsOrder;

/// Reusable impulse-response estimator for one MLS order
///
/// Holds shared, read-only tag tables and the two scratch buffers of the
/// pipeline, so repeated estimates with the same order allocate nothing.
/// Every call overwrites both buffers completely.
pub struct Deconvolver {
    tags: Arc<TagTables>,
    perm: Vec<f64>,
    resp: Vec<f64>,
}

impl Deconvolver {
    pub fn new(tags: Arc<TagTables>) -> Self {
        let len = tags.order().hadamard_len();
        Self {
            tags,
            perm: vec![0.0; len],
            resp: vec![0.0; len],
        }
    }

    pub fn order(&self) -> MlsOrder {
        self.tags.order()
    }

    pub fn period(&self) -> usize {
        self.tags.period()
    }

    /// Estimate the impulse response from one captured period
    ///
    /// Runs permute, transform and inverse permute in sequence. The
    /// returned slice has P + 1 entries, the last of which is zero. Fails
    /// with `LengthMismatch` unless `recorded` holds exactly P samples, or
    /// with `InvalidData` if it contains a non-finite value.
    pub fn estimate(&mut self, recorded: &[f64]) -> Result<&[f64]> {
        run_pipeline(recorded, &self.tags, &mut self.perm, &mut self.resp)?;
        Ok(&self.resp)
    }
}

/// Estimate an impulse response with freshly allocated buffers
pub fn estimate_impulse_response(recorded: &[f64], tags: &TagTables) -> Result<Vec<f64>> {
    let len = tags.order().hadamard_len();
    let mut perm = vec![0.0; len];
    let mut resp = vec![0.0; len];
    run_pipeline(recorded, tags, &mut perm, &mut resp)?;
    Ok(resp)
}

fn run_pipeline(
    recorded: &[f64],
    tags: &TagTables,
    perm: &mut [f64],
    resp: &mut [f64],
) -> Result<()> {
    if recorded.len() != tags.period() {
        return Err(MlsError::LengthMismatch {
            expected: tags.period(),
            actual: recorded.len(),
        });
    }
    if let Some(position) = recorded.iter().position(|x| !x.is_finite()) {
        return Err(MlsError::InvalidData(format!(
            "non-finite sample at position {}",
            position
        )));
    }

    log::debug!("Permuting {} samples into Hadamard order", recorded.len());
    permute_signal(recorded, tags.tag_s(), perm)?;

    log::debug!("Fast Hadamard transform of size {}", perm.len());
    fast_hadamard_transform(perm)?;

    log::debug!("Permuting response back to lag order");
    permute_response(perm, tags.tag_l(), resp)
}
