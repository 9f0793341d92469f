//! Stored records and their kind-tagged payloads.

use chrono::{DateTime, Utc};
use indicata_shared::types::RecordId;
use serde::{Deserialize, Serialize};

use super::period::PeriodAmountRecord;
use super::sector::SectorShareRecord;
use super::target::TargetRecord;
use super::types::RecordKind;

/// A record payload of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RecordData {
    /// Sector share snapshot.
    SectorShare(SectorShareRecord),
    /// Period amount observation.
    PeriodAmount(PeriodAmountRecord),
    /// Target with series.
    Target(TargetRecord),
}

impl RecordData {
    /// Returns the kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::SectorShare(_) => RecordKind::SectorShare,
            Self::PeriodAmount(_) => RecordKind::PeriodAmount,
            Self::Target(_) => RecordKind::Target,
        }
    }

    /// Returns the active flag, or `None` for kinds without one.
    #[must_use]
    pub const fn is_active(&self) -> Option<bool> {
        match self {
            Self::PeriodAmount(record) => Some(record.is_active),
            Self::SectorShare(_) | Self::Target(_) => None,
        }
    }

    /// Returns the sector share payload, if this is one.
    #[must_use]
    pub const fn as_sector_share(&self) -> Option<&SectorShareRecord> {
        match self {
            Self::SectorShare(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the period amount payload, if this is one.
    #[must_use]
    pub const fn as_period_amount(&self) -> Option<&PeriodAmountRecord> {
        match self {
            Self::PeriodAmount(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the target payload, if this is one.
    #[must_use]
    pub const fn as_target(&self) -> Option<&TargetRecord> {
        match self {
            Self::Target(record) => Some(record),
            _ => None,
        }
    }
}

impl From<SectorShareRecord> for RecordData {
    fn from(record: SectorShareRecord) -> Self {
        Self::SectorShare(record)
    }
}

impl From<PeriodAmountRecord> for RecordData {
    fn from(record: PeriodAmountRecord) -> Self {
        Self::PeriodAmount(record)
    }
}

impl From<TargetRecord> for RecordData {
    fn from(record: TargetRecord) -> Self {
        Self::Target(record)
    }
}

/// A record as held by the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record identifier.
    pub id: RecordId,
    /// Kind-tagged payload.
    #[serde(flatten)]
    pub data: RecordData,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Returns the kind of this record.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    /// Returns true if the record carries an active flag set to `true`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.data.is_active().unwrap_or(false)
    }
}
