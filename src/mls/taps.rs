//! Feedback tap table for the supported LFSR orders
//!
//! Each entry lists the delay-line stages that feed the XOR sum for one
//! order. Every pattern corresponds to a primitive polynomial over GF(2),
//! which is what makes the generated sequence maximal-length. This is a
//! property of the table and is not re-checked during generation.

use super::MlsOrder;
use crate::constants::ORDER_COUNT;

/// Feedback taps of an N-stage delay line
///
/// Bit `j` of the mask is set when stage `j` contributes to the feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapPattern {
    order: u32,
    mask: u32,
}

impl TapPattern {
    const fn from_stages(order: u32, stages: &[u32]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < stages.len() {
            mask |= 1 << stages[i];
            i += 1;
        }
        Self { order, mask }
    }

    /// Look up the tap pattern for an order
    pub fn for_order(order: MlsOrder) -> Self {
        TAP_TABLE[order.slot()]
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Whether stage `stage` feeds back
    pub fn is_tap(&self, stage: usize) -> bool {
        stage < self.order as usize && self.mask & (1 << stage) != 0
    }

    /// Stage indices that feed back, lowest first
    pub fn stages(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.order as usize).filter(|&stage| self.is_tap(stage))
    }
}

const TAP_TABLE: [TapPattern; ORDER_COUNT] = [
    TapPattern::from_stages(3, &[1, 2]),
    TapPattern::from_stages(4, &[2, 3]),
    TapPattern::from_stages(5, &[2, 4]),
    TapPattern::from_stages(6, &[4, 5]),
    TapPattern::from_stages(7, &[3, 6]),
    TapPattern::from_stages(8, &[3, 4, 5, 7]),
    TapPattern::from_stages(9, &[4, 8]),
    TapPattern::from_stages(10, &[6, 9]),
    TapPattern::from_stages(11, &[8, 10]),
    TapPattern::from_stages(12, &[5, 7, 10, 11]),
    TapPattern::from_stages(13, &[8, 9, 11, 12]),
    TapPattern::from_stages(14, &[3, 7, 12, 13]),
    TapPattern::from_stages(15, &[13, 14]),
    TapPattern::from_stages(16, &[3, 12, 14, 15]),
    TapPattern::from_stages(17, &[13, 16]),
    TapPattern::from_stages(18, &[10, 17]),
];
