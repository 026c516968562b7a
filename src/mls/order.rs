use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{DEFAULT_ORDER, MAX_ORDER, MIN_ORDER};
use crate::error::{MlsError, Result};

/// LFSR order N of a maximum-length sequence
///
/// Always within the range covered by the tap table, so every value of
/// this type has a primitive feedback polynomial available.
///
/// # Example
/// ```
/// use mlsdeconv::MlsOrder;
///
/// let order: MlsOrder = "10".parse().unwrap();
/// assert_eq!(order.period(), 1023);
/// assert_eq!(order.hadamard_len(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u32")]
pub struct MlsOrder(u32);

impl MlsOrder {
    /// Validate an order against the tap table's domain
    pub fn new(order: u32) -> Result<Self> {
        if (MIN_ORDER..=MAX_ORDER).contains(&order) {
            Ok(Self(order))
        } else {
            Err(MlsError::InvalidOrder(order))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Sequence length P = 2^N - 1
    pub fn period(&self) -> usize {
        (1usize << self.0) - 1
    }

    /// Hadamard transform size P + 1 = 2^N
    pub fn hadamard_len(&self) -> usize {
        1usize << self.0
    }

    /// Zero-based slot of this order among all supported orders
    pub(crate) fn slot(&self) -> usize {
        (self.0 - MIN_ORDER) as usize
    }

    /// Recover the order from a sequence length, if it is of the form 2^N - 1
    pub fn from_period(period: usize) -> Result<Self> {
        let hadamard_len = period
            .checked_add(1)
            .filter(|len| len.is_power_of_two())
            .ok_or_else(|| {
                MlsError::InvalidData(format!("length {} is not of the form 2^N - 1", period))
            })?;
        Self::new(hadamard_len.trailing_zeros())
    }

    /// All supported orders, smallest first
    pub fn all() -> impl Iterator<Item = MlsOrder> {
        (MIN_ORDER..=MAX_ORDER).map(MlsOrder)
    }
}

impl Default for MlsOrder {
    fn default() -> Self {
        Self(DEFAULT_ORDER)
    }
}

impl TryFrom<u32> for MlsOrder {
    type Error = MlsError;

    fn try_from(order: u32) -> Result<Self> {
        Self::new(order)
    }
}

impl fmt::Display for MlsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MlsOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let order: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid order: {}", s))?;
        Self::new(order).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_bounds() {
        assert!(MlsOrder::new(2).is_err());
        assert!(MlsOrder::new(3).is_ok());
        assert!(MlsOrder::new(18).is_ok());
        assert_eq!(MlsOrder::new(19), Err(MlsError::InvalidOrder(19)));
    }

    #[test]
    fn test_order_lengths() {
        let order = MlsOrder::new(3).unwrap();
        assert_eq!(order.period(), 7);
        assert_eq!(order.hadamard_len(), 8);

        let order = MlsOrder::new(18).unwrap();
        assert_eq!(order.period(), 262_143);
    }

    #[test]
    fn test_order_from_period() {
        assert_eq!(MlsOrder::from_period(7).unwrap().get(), 3);
        assert_eq!(MlsOrder::from_period(65_535).unwrap().get(), 16);
        assert!(MlsOrder::from_period(8).is_err());
        // 2^2 - 1 has the right shape but no tap table entry
        assert_eq!(MlsOrder::from_period(3), Err(MlsError::InvalidOrder(2)));
    }

    #[test]
    fn test_order_parse() {
        assert_eq!("12".parse::<MlsOrder>().unwrap().get(), 12);
        assert_eq!(" 5 ".parse::<MlsOrder>().unwrap().get(), 5);
        assert!("abc".parse::<MlsOrder>().is_err());
        assert!("24".parse::<MlsOrder>().is_err());
    }

    #[test]
    fn test_all_orders() {
        let orders: Vec<u32> = MlsOrder::all().map(|o| o.get()).collect();
        assert_eq!(orders.first(), Some(&MIN_ORDER));
        assert_eq!(orders.last(), Some(&MAX_ORDER));
        assert_eq!(orders.len(), crate::constants::ORDER_COUNT);
    }
}
