//! Period amount records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Quarter;

/// A single (year, quarter, amount) observation, e.g. GDP in a quarter.
///
/// At most one record of this kind is active at a time; the active one is
/// the "current" figure shown on dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAmountRecord {
    /// Observation year.
    pub year: i32,
    /// Observation quarter.
    pub quarter: Quarter,
    /// Amount in billions of the reporting currency.
    #[serde(rename = "amountBillionRwf")]
    pub amount_billion: Decimal,
    /// Whether this is the current figure. Defaults to `false` when unset.
    #[serde(default)]
    pub is_active: bool,
}

impl PeriodAmountRecord {
    /// Creates an inactive observation.
    #[must_use]
    pub const fn new(year: i32, quarter: Quarter, amount_billion: Decimal) -> Self {
        Self {
            year,
            quarter,
            amount_billion,
            is_active: false,
        }
    }

    /// Returns the same observation marked active.
    #[must_use]
    pub const fn activated(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// `(year, quarter)` key for chronological ordering.
    #[must_use]
    pub const fn period(&self) -> (i32, Quarter) {
        (self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_shape() {
        let record = PeriodAmountRecord::new(2024, Quarter::Q2, dec!(4120.5)).activated();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["year"], 2024);
        assert_eq!(json["quarter"], "Q2");
        assert_eq!(json["amountBillionRwf"], "4120.5");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn test_is_active_defaults_to_false() {
        let record: PeriodAmountRecord =
            serde_json::from_str(r#"{"year": 2023, "quarter": "Q4", "amountBillionRwf": 3900}"#)
                .unwrap();
        assert!(!record.is_active);
        assert_eq!(record.period(), (2023, Quarter::Q4));
    }
}
