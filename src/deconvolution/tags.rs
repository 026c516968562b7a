//! Permutation tables linking MLS order to Hadamard order
//!
//! `tag_s` scatters a captured period into the positions where a Walsh-
//! Hadamard transform computes its cyclic correlation with the MLS;
//! `tag_l` gathers the transformed values back into lag order. Both are
//! permutations of `1..=P`; slot 0 of the Hadamard buffer carries the DC
//! term and is never addressed by either table.

use crate::error::{MlsError, Result};
use crate::mls::{MaximumLengthSequence, MlsOrder};

/// The scatter (`tag_s`) and gather (`tag_l`) permutations for one MLS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTables {
    order: MlsOrder,
    tag_s: Vec<usize>,
    tag_l: Vec<usize>,
}

impl TagTables {
    /// Build both tables from a sequence, checking bijectivity
    pub fn build(mls: &MaximumLengthSequence) -> Result<Self> {
        let tag_s = build_tag_s(mls);
        validate_permutation("tagS", &tag_s, mls.period())?;

        let anchors = locate_anchors(mls)?;
        let tag_l = read_back_tag_l(mls, &anchors);
        validate_permutation("tagL", &tag_l, mls.period())?;

        Ok(Self {
            order: mls.order(),
            tag_s,
            tag_l,
        })
    }

    /// Assemble tables loaded from storage
    pub fn from_parts(order: MlsOrder, tag_s: Vec<usize>, tag_l: Vec<usize>) -> Result<Self> {
        for (name, table) in [("tagS", &tag_s), ("tagL", &tag_l)] {
            if table.len() != order.period() {
                return Err(MlsError::LengthMismatch {
                    expected: order.period(),
                    actual: table.len(),
                });
            }
            validate_permutation(name, table, order.period())?;
        }
        Ok(Self {
            order,
            tag_s,
            tag_l,
        })
    }

    /// Check that both tables are the ones `mls` produces
    ///
    /// Bijectivity alone accepts stale or swapped tables; this rebuilds
    /// each pass and fails with `InvalidData` at the first differing entry.
    pub fn verify_against(&self, mls: &MaximumLengthSequence) -> Result<()> {
        if mls.order() != self.order {
            return Err(MlsError::InvalidData(format!(
                "tag tables of order {} paired with a sequence of order {}",
                self.order,
                mls.order()
            )));
        }

        let anchors = locate_anchors(mls)?;
        for (name, stored, rebuilt) in [
            ("tagS", &self.tag_s, build_tag_s(mls)),
            ("tagL", &self.tag_l, read_back_tag_l(mls, &anchors)),
        ] {
            if let Some(position) = stored.iter().zip(&rebuilt).position(|(a, b)| a != b) {
                return Err(MlsError::InvalidData(format!(
                    "{} does not match the sequence: entry {} is {}, expected {}",
                    name, position, stored[position], rebuilt[position]
                )));
            }
        }
        Ok(())
    }

    pub fn order(&self) -> MlsOrder {
        self.order
    }

    pub fn period(&self) -> usize {
        self.tag_s.len()
    }

    pub fn tag_s(&self) -> &[usize] {
        &self.tag_s
    }

    pub fn tag_l(&self) -> &[usize] {
        &self.tag_l
    }
}

/// Build `tag_s` and `tag_l` for a sequence
pub fn build_tag_tables(mls: &MaximumLengthSequence) -> Result<TagTables> {
    log::debug!("Building tag tables for order {}", mls.order());
    TagTables::build(mls)
}

/// `tag_s[i]` is the N-bit window ending at `i`, most recent bit first
pub fn build_tag_s(mls: &MaximumLengthSequence) -> Vec<usize> {
    (0..mls.period()).map(|i| mls.window_value(i)).collect()
}

/// First `tag_l` pass: position of each power-of-two window
///
/// Scans the column sums `sum_j mls[(P + i - j) mod P] * 2^(N-1-j)` and
/// records, for every bit `j`, the position `i` whose sum is `2^j`. Each
/// power of two occurs exactly once in a maximal-length sequence.
pub fn locate_anchors(mls: &MaximumLengthSequence) -> Result<Vec<usize>> {
    let n = mls.order().get() as usize;
    let mut anchors: Vec<Option<usize>> = vec![None; n];

    for i in 0..mls.period() {
        let column_sum = mls.window_value(i);
        if column_sum.is_power_of_two() {
            let bit = column_sum.trailing_zeros() as usize;
            if anchors[bit].replace(i).is_some() {
                return Err(non_bijective(
                    "tagL",
                    mls.period(),
                    format!("window 2^{} occurs more than once", bit),
                ));
            }
        }
    }

    anchors
        .into_iter()
        .enumerate()
        .map(|(bit, anchor)| {
            anchor.ok_or_else(|| {
                non_bijective("tagL", mls.period(), format!("window 2^{} never occurs", bit))
            })
        })
        .collect()
}

/// Second `tag_l` pass: read an N-bit value back from the anchors
///
/// `tag_l[i] = sum_j mls[(P + anchors[j] - i) mod P] * 2^j`
pub fn read_back_tag_l(mls: &MaximumLengthSequence, anchors: &[usize]) -> Vec<usize> {
    let period = mls.period();
    (0..period)
        .map(|i| {
            anchors.iter().enumerate().fold(0, |acc, (j, &anchor)| {
                let bit = mls.bits()[(period + anchor - i) % period] as usize;
                acc | (bit << j)
            })
        })
        .collect()
}

/// Check that `table` holds every value of `1..=period` exactly once
pub fn validate_permutation(name: &'static str, table: &[usize], period: usize) -> Result<()> {
    if table.len() != period {
        return Err(non_bijective(
            name,
            period,
            format!("has {} entries", table.len()),
        ));
    }

    let mut seen = vec![false; period + 1];
    for (position, &value) in table.iter().enumerate() {
        if value == 0 || value > period {
            return Err(non_bijective(
                name,
                period,
                format!("value {} at position {} is out of range", value, position),
            ));
        }
        if seen[value] {
            return Err(non_bijective(
                name,
                period,
                format!("value {} repeats at position {}", value, position),
            ));
        }
        seen[value] = true;
    }
    Ok(())
}

fn non_bijective(table: &'static str, period: usize, detail: String) -> MlsError {
    MlsError::NonBijectivePermutation {
        table,
        period,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mls::generate_mls;

    #[test]
    fn test_order_3_tables() {
        let mls = generate_mls(3).unwrap();
        assert_eq!(build_tag_s(&mls), vec![5, 6, 7, 3, 1, 4, 2]);

        let anchors = locate_anchors(&mls).unwrap();
        assert_eq!(anchors, vec![4, 6, 5]);

        assert_eq!(read_back_tag_l(&mls, &anchors), vec![4, 2, 1, 5, 7, 6, 3]);
    }

    #[test]
    fn test_tag_s_is_permutation() {
        for order in MlsOrder::all().filter(|o| o.get() <= 14) {
            let mls = MaximumLengthSequence::generate(order);
            validate_permutation("tagS", &build_tag_s(&mls), mls.period())
                .unwrap_or_else(|e| panic!("order {}: {}", order, e));
        }
    }

    #[test]
    fn test_anchors_address_powers_of_two() {
        for order in MlsOrder::all().filter(|o| o.get() <= 14) {
            let mls = MaximumLengthSequence::generate(order);
            let anchors = locate_anchors(&mls).unwrap();
            assert_eq!(anchors.len(), order.get() as usize);
            for (bit, &anchor) in anchors.iter().enumerate() {
                assert_eq!(mls.window_value(anchor), 1 << bit, "order {}", order);
            }
        }
    }

    #[test]
    fn test_tag_l_is_permutation() {
        for order in MlsOrder::all().filter(|o| o.get() <= 14) {
            let mls = MaximumLengthSequence::generate(order);
            let anchors = locate_anchors(&mls).unwrap();
            validate_permutation("tagL", &read_back_tag_l(&mls, &anchors), mls.period())
                .unwrap_or_else(|e| panic!("order {}: {}", order, e));
        }
    }

    #[test]
    fn test_tag_l_starts_at_top_bit() {
        // Lag 0 reads the anchor windows themselves, so only the top bit survives
        for order in MlsOrder::all().filter(|o| o.get() <= 12) {
            let tables = TagTables::build(&MaximumLengthSequence::generate(order)).unwrap();
            assert_eq!(tables.tag_l()[0], 1 << (order.get() - 1));
        }
    }

    #[test]
    fn test_non_maximal_sequence_rejected() {
        let mls = MaximumLengthSequence::from_bits(vec![true, false, true, false, true, false, true])
            .unwrap();
        let err = TagTables::build(&mls).unwrap_err();
        assert!(matches!(err, MlsError::NonBijectivePermutation { .. }));
    }

    #[test]
    fn test_verify_against_rejects_swapped_tables() {
        let mls = generate_mls(4).unwrap();
        let built = TagTables::build(&mls).unwrap();
        assert!(built.verify_against(&mls).is_ok());

        let swapped =
            TagTables::from_parts(mls.order(), built.tag_l().to_vec(), built.tag_s().to_vec())
                .unwrap();
        let err = swapped.verify_against(&mls).unwrap_err();
        assert!(matches!(err, MlsError::InvalidData(msg) if msg.starts_with("tagS")));
    }

    #[test]
    fn test_verify_against_rejects_other_order() {
        let tables = TagTables::build(&generate_mls(5).unwrap()).unwrap();
        assert!(tables.verify_against(&generate_mls(6).unwrap()).is_err());
    }

    #[test]
    fn test_validate_permutation_errors() {
        assert!(validate_permutation("t", &[1, 2, 3], 3).is_ok());
        assert!(validate_permutation("t", &[0, 1, 2], 3).is_err());
        assert!(validate_permutation("t", &[1, 1, 3], 3).is_err());
        assert!(validate_permutation("t", &[1, 2, 4], 3).is_err());
        assert!(validate_permutation("t", &[1, 2], 3).is_err());
    }

    #[test]
    fn test_from_parts_checks_lengths() {
        let order = MlsOrder::new(3).unwrap();
        let err = TagTables::from_parts(order, vec![1, 2, 3], vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            MlsError::LengthMismatch {
                expected: 7,
                actual: 3
            }
        );

        let mls = generate_mls(3).unwrap();
        let built = TagTables::build(&mls).unwrap();
        let loaded =
            TagTables::from_parts(order, built.tag_s().to_vec(), built.tag_l().to_vec()).unwrap();
        assert_eq!(built, loaded);
    }
}
