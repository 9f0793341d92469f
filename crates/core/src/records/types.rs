//! Small shared record enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The stored record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Sector share snapshots.
    SectorShare,
    /// Period amount observations (e.g. quarterly GDP).
    PeriodAmount,
    /// Poverty/SDG-style targets.
    Target,
}

impl RecordKind {
    /// All record kinds.
    pub const ALL: [Self; 3] = [Self::SectorShare, Self::PeriodAmount, Self::Target];

    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SectorShare => "sector_share",
            Self::PeriodAmount => "period_amount",
            Self::Target => "target",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sector_share" => Some(Self::SectorShare),
            "period_amount" => Some(Self::PeriodAmount),
            "target" => Some(Self::Target),
            _ => None,
        }
    }

    /// Returns true if records of this kind carry an `isActive` flag and are
    /// subject to the single-active rule.
    #[must_use]
    pub const fn has_active_flag(self) -> bool {
        matches!(self, Self::PeriodAmount)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Quarter {
    /// January to March.
    Q1,
    /// April to June.
    Q2,
    /// July to September.
    Q3,
    /// October to December.
    Q4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Returns the string representation of the quarter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// Returns the quarter number (1-4).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a quarter string is not `Q1`..`Q4`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid quarter: {0} (expected Q1, Q2, Q3 or Q4)")]
pub struct ParseQuarterError(pub String);

impl FromStr for Quarter {
    type Err = ParseQuarterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            _ => Err(ParseQuarterError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Quarter {
    type Error = ParseQuarterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quarter> for String {
    fn from(quarter: Quarter) -> Self {
        quarter.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RecordKind::parse("PERIOD_AMOUNT"), Some(RecordKind::PeriodAmount));
        assert_eq!(RecordKind::parse("ledger"), None);
    }

    #[test]
    fn test_only_period_amounts_have_active_flag() {
        assert!(RecordKind::PeriodAmount.has_active_flag());
        assert!(!RecordKind::SectorShare.has_active_flag());
        assert!(!RecordKind::Target.has_active_flag());
    }

    #[test]
    fn test_quarter_parse_is_case_insensitive() {
        assert_eq!("q3".parse::<Quarter>(), Ok(Quarter::Q3));
        assert_eq!(" Q1 ".parse::<Quarter>(), Ok(Quarter::Q1));
        assert!("Q5".parse::<Quarter>().is_err());
    }

    #[test]
    fn test_quarter_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Quarter::Q2).unwrap(), "\"Q2\"");
        let parsed: Quarter = serde_json::from_str("\"q4\"").unwrap();
        assert_eq!(parsed, Quarter::Q4);
        assert!(serde_json::from_str::<Quarter>("\"Q0\"").is_err());
    }

    #[test]
    fn test_quarter_order() {
        assert!(Quarter::Q1 < Quarter::Q4);
        assert_eq!(Quarter::Q3.number(), 3);
    }
}
