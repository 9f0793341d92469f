//! Poverty/SDG-style target records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of a target's trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Observation year.
    pub year: i32,
    /// Observed percentage.
    pub percentage: Decimal,
}

/// One point of a target's geographic series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Observation year.
    pub year: i32,
    /// Location name (district, province).
    pub location: String,
    /// Poverty rate at the location, in percent.
    pub poverty_rate: Decimal,
}

/// A target with its trend and map series.
///
/// No active-singleton rule applies. The series are append-only: edits add
/// points, they never rewrite existing ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    /// Target name.
    pub target_name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_description: Option<String>,
    /// Target percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_percentage: Option<Decimal>,
    /// Data source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Trend series, in entry order.
    #[serde(default)]
    pub trend: Vec<TrendPoint>,
    /// Map series, in entry order.
    #[serde(default)]
    pub map: Vec<MapPoint>,
}

impl TargetRecord {
    /// Creates a target with no series.
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            target_description: None,
            target_percentage: None,
            source: None,
            trend: Vec::new(),
            map: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_shape() {
        let mut target = TargetRecord::new("Extreme poverty");
        target.target_percentage = Some(dec!(10));
        target.map.push(MapPoint {
            year: 2024,
            location: "Nyagatare".into(),
            poverty_rate: dec!(31.2),
        });

        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["targetName"], "Extreme poverty");
        assert_eq!(json["targetPercentage"], "10");
        assert_eq!(json["map"][0]["povertyRate"], "31.2");
        assert!(json["trend"].as_array().unwrap().is_empty());
        assert!(json.get("source").is_none());
    }

    #[test]
    fn test_minimal_payload() {
        let target: TargetRecord = serde_json::from_str(r#"{"targetName": "SDG 1.1"}"#).unwrap();
        assert_eq!(target, TargetRecord::new("SDG 1.1"));
    }
}
