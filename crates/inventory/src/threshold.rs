use serde::{Deserialize, Serialize};

use stockwatch_core::ValueObject;

/// Global low-stock threshold.
///
/// Always non-negative: any negative input is normalized to `0`, which means
/// "notify only when stock runs out". Deserialization goes through the same
/// normalization, so a bad settings value can never reach the evaluator.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct StockThreshold(i64);

impl StockThreshold {
    /// Out-of-stock only.
    pub const ZERO: Self = Self(0);

    pub fn new(raw: i64) -> Self {
        Self(raw.max(0))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for StockThreshold {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<StockThreshold> for i64 {
    fn from(value: StockThreshold) -> Self {
        value.0
    }
}

impl core::fmt::Display for StockThreshold {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl ValueObject for StockThreshold {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_threshold_normalizes_to_zero() {
        assert_eq!(StockThreshold::new(-3), StockThreshold::ZERO);
        assert_eq!(StockThreshold::new(i64::MIN).get(), 0);
        assert_eq!(StockThreshold::new(5).get(), 5);
    }

    #[test]
    fn deserializing_applies_the_same_normalization() {
        let t: StockThreshold = serde_json::from_str("-12").unwrap();
        assert_eq!(t, StockThreshold::ZERO);

        let t: StockThreshold = serde_json::from_str("8").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "8");
    }
}
