use super::{MlsOrder, TapPattern};
use crate::error::{MlsError, Result};

/// One period of a maximum-length sequence
///
/// Produced by an N-stage linear feedback shift register whose delay line
/// starts all ones. The sequence is immutable once generated; derived
/// tables and stimuli borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaximumLengthSequence {
    order: MlsOrder,
    bits: Vec<bool>,
}

impl MaximumLengthSequence {
    /// Generate one full period for the given order
    ///
    /// Each step XORs the tapped stages into a feedback bit, emits the
    /// oldest stage, shifts the delay line by one and inserts the
    /// feedback at stage 0. Stage `j` of the delay line is bit `j` of
    /// `register`.
    pub fn generate(order: MlsOrder) -> Self {
        let n = order.get();
        let taps = TapPattern::for_order(order);
        let stage_mask = (1u32 << n) - 1;
        let mut register = stage_mask;

        let period = order.period();
        let mut bits = Vec::with_capacity(period);
        for _ in 0..period {
            let feedback = (register & taps.mask()).count_ones() & 1;
            bits.push((register >> (n - 1)) & 1 == 1);
            register = ((register << 1) | feedback) & stage_mask;
        }

        Self { order, bits }
    }

    /// Wrap an externally supplied sequence, e.g. one loaded from disk
    ///
    /// The length must be 2^N - 1 for a supported order. Maximality is
    /// not checked here; building tag tables from a non-maximal sequence
    /// fails with `NonBijectivePermutation`.
    pub fn from_bits(bits: Vec<bool>) -> Result<Self> {
        let order = MlsOrder::from_period(bits.len())?;
        Ok(Self { order, bits })
    }

    pub fn order(&self) -> MlsOrder {
        self.order
    }

    /// Sequence length P
    pub fn period(&self) -> usize {
        self.bits.len()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Integer formed by the N-bit cyclic window ending at `index`
    ///
    /// The bit at `index` is the most significant:
    /// `sum_j mls[(P + index - j) mod P] * 2^(N-1-j)`.
    pub fn window_value(&self, index: usize) -> usize {
        let n = self.order.get() as usize;
        let period = self.period();
        (0..n).fold(0, |acc, j| {
            let bit = self.bits[(period + index - j) % period] as usize;
            acc | (bit << (n - 1 - j))
        })
    }

    /// Check the maximal-length property directly
    ///
    /// Every non-zero N-bit window must occur exactly once per period.
    pub fn verify_maximal_length(&self) -> Result<()> {
        let period = self.period();
        let mut seen = vec![false; period + 1];
        for index in 0..period {
            let value = self.window_value(index);
            if value == 0 || seen[value] {
                return Err(MlsError::InvalidData(format!(
                    "sequence of order {} is not maximal-length: window {} at position {} {}",
                    self.order,
                    value,
                    index,
                    if value == 0 { "is all zeros" } else { "repeats" }
                )));
            }
            seen[value] = true;
        }
        Ok(())
    }
}

/// Generate the maximum-length sequence for an order
///
/// Fails with `InvalidOrder` when the tap table has no entry for `order`.
pub fn generate_mls(order: u32) -> Result<MaximumLengthSequence> {
    let order = MlsOrder::new(order)?;
    log::debug!("Generating MLS of order {} ({} samples)", order, order.period());
    Ok(MaximumLengthSequence::generate(order))
}
