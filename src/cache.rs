//! Per-order cache of generated sequences and tag tables
//!
//! Tables for one order are built at most once and then shared read-only.
//! Each order has its own lock, so populating different orders does not
//! serialize, while concurrent requests for the same order wait for the
//! first build to finish.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::constants::ORDER_COUNT;
use crate::deconvolution::{Deconvolver, TagTables};
use crate::error::{MlsError, Result};
use crate::mls::{MaximumLengthSequence, MlsOrder, to_bipolar};

/// Everything derived from one MLS: the bits, its stimulus and tag tables
#[derive(Debug)]
pub struct MlsTables {
    mls: MaximumLengthSequence,
    stimulus: Vec<f64>,
    tags: Arc<TagTables>,
}

impl MlsTables {
    /// Generate the sequence for `order` and derive its tables
    pub fn build(order: MlsOrder) -> Result<Self> {
        let start = Instant::now();
        let mls = MaximumLengthSequence::generate(order);
        let tags = TagTables::build(&mls)?;
        log::info!(
            "Built MLS tables for order {} ({} samples) in {:.1} ms",
            order,
            order.period(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self::assemble(mls, tags))
    }

    /// Combine a sequence with tables obtained elsewhere, e.g. from disk
    pub fn from_parts(mls: MaximumLengthSequence, tags: TagTables) -> Result<Self> {
        if mls.order() != tags.order() {
            return Err(MlsError::InvalidData(format!(
                "sequence of order {} paired with tag tables of order {}",
                mls.order(),
                tags.order()
            )));
        }
        Ok(Self::assemble(mls, tags))
    }

    fn assemble(mls: MaximumLengthSequence, tags: TagTables) -> Self {
        let stimulus = to_bipolar(mls.bits());
        Self {
            mls,
            stimulus,
            tags: Arc::new(tags),
        }
    }

    pub fn order(&self) -> MlsOrder {
        self.mls.order()
    }

    pub fn mls(&self) -> &MaximumLengthSequence {
        &self.mls
    }

    /// Bipolar excitation signal, one period
    pub fn stimulus(&self) -> &[f64] {
        &self.stimulus
    }

    pub fn tags(&self) -> &Arc<TagTables> {
        &self.tags
    }

    /// A new estimator sharing these tables
    pub fn deconvolver(&self) -> Deconvolver {
        Deconvolver::new(Arc::clone(&self.tags))
    }
}

/// Lazily populated tables, one slot per supported order
pub struct TableCache {
    slots: [Mutex<Option<Arc<MlsTables>>>; ORDER_COUNT],
}

impl TableCache {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Mutex::new(None)),
        }
    }

    /// Tables for `order`, built on first use
    ///
    /// A failed build leaves the slot empty and returns the error.
    pub fn tables(&self, order: MlsOrder) -> Result<Arc<MlsTables>> {
        let mut slot = self.slots[order.slot()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(tables) = slot.as_ref() {
            return Ok(Arc::clone(tables));
        }

        let tables = Arc::new(MlsTables::build(order)?);
        *slot = Some(Arc::clone(&tables));
        Ok(tables)
    }

    pub fn is_cached(&self, order: MlsOrder) -> bool {
        self.slots[order.slot()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}
