//! Partial edits to stored records.
//!
//! A patch is applied to the current payload to produce the candidate
//! payload, which is then validated as a whole before it is written.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::period::PeriodAmountRecord;
use super::record::RecordData;
use super::sector::{SectorShareRecord, SubShares};
use super::target::{MapPoint, TargetRecord, TrendPoint};
use super::types::{Quarter, RecordKind};

/// A patch was applied to a payload of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot apply a {patch} patch to a {record} record")]
pub struct KindMismatch {
    /// Kind the patch targets.
    pub patch: RecordKind,
    /// Kind of the stored record.
    pub record: RecordKind,
}

/// Partial edit to a sector share record. `None` leaves a field unchanged;
/// a sub-share map, when given, replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectorSharePatch {
    /// New GDP total.
    pub total_gdp: Option<Decimal>,
    /// New services share.
    pub services_share: Option<Decimal>,
    /// New industry share.
    pub industry_share: Option<Decimal>,
    /// New agriculture share.
    pub agriculture_share: Option<Decimal>,
    /// New taxes share.
    pub taxes_share: Option<Decimal>,
    /// Replacement services breakdown.
    pub services_sub_shares: Option<SubShares>,
    /// Replacement agriculture breakdown.
    pub agriculture_sub_shares: Option<SubShares>,
    /// Replacement industry breakdown.
    pub industry_sub_shares: Option<SubShares>,
    /// New private sector share.
    pub private_sector: Option<Decimal>,
    /// New government sector share.
    pub government_sector: Option<Decimal>,
    /// New imports share.
    pub imports: Option<Decimal>,
    /// New exports share.
    pub exports: Option<Decimal>,
}

/// Partial edit to a period amount record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeriodAmountPatch {
    /// New year.
    pub year: Option<i32>,
    /// New quarter.
    pub quarter: Option<Quarter>,
    /// New amount.
    #[serde(rename = "amountBillionRwf")]
    pub amount_billion: Option<Decimal>,
    /// New active flag. Setting `true` demotes the current active record.
    pub is_active: Option<bool>,
}

/// Partial edit to a target record. Series points are appended, never
/// replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetPatch {
    /// New name.
    pub target_name: Option<String>,
    /// New description.
    pub target_description: Option<String>,
    /// New target percentage.
    pub target_percentage: Option<Decimal>,
    /// New source.
    pub source: Option<String>,
    /// Trend points to append.
    pub append_trend: Vec<TrendPoint>,
    /// Map points to append.
    pub append_map: Vec<MapPoint>,
}

/// A kind-tagged partial edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "patch", rename_all = "snake_case")]
pub enum RecordPatch {
    /// Sector share edit.
    SectorShare(SectorSharePatch),
    /// Period amount edit.
    PeriodAmount(PeriodAmountPatch),
    /// Target edit.
    Target(TargetPatch),
}

impl RecordPatch {
    /// Returns the kind this patch targets.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::SectorShare(_) => RecordKind::SectorShare,
            Self::PeriodAmount(_) => RecordKind::PeriodAmount,
            Self::Target(_) => RecordKind::Target,
        }
    }

    /// Applies the patch to `data`, producing the candidate payload.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if `data` is of another kind.
    pub fn apply(self, data: RecordData) -> Result<RecordData, KindMismatch> {
        match (self, data) {
            (Self::SectorShare(patch), RecordData::SectorShare(record)) => {
                Ok(RecordData::SectorShare(patch.apply(record)))
            }
            (Self::PeriodAmount(patch), RecordData::PeriodAmount(record)) => {
                Ok(RecordData::PeriodAmount(patch.apply(record)))
            }
            (Self::Target(patch), RecordData::Target(record)) => {
                Ok(RecordData::Target(patch.apply(record)))
            }
            (patch, data) => Err(KindMismatch {
                patch: patch.kind(),
                record: data.kind(),
            }),
        }
    }
}

impl SectorSharePatch {
    /// Applies the patch to `record`.
    #[must_use]
    pub fn apply(self, mut record: SectorShareRecord) -> SectorShareRecord {
        if let Some(v) = self.total_gdp {
            record.total_gdp = v;
        }
        if let Some(v) = self.services_share {
            record.services_share = v;
        }
        if let Some(v) = self.industry_share {
            record.industry_share = v;
        }
        if let Some(v) = self.agriculture_share {
            record.agriculture_share = v;
        }
        if let Some(v) = self.taxes_share {
            record.taxes_share = v;
        }
        if let Some(v) = self.services_sub_shares {
            record.services_sub_shares = v;
        }
        if let Some(v) = self.agriculture_sub_shares {
            record.agriculture_sub_shares = v;
        }
        if let Some(v) = self.industry_sub_shares {
            record.industry_sub_shares = v;
        }
        record.private_sector = self.private_sector.or(record.private_sector);
        record.government_sector = self.government_sector.or(record.government_sector);
        record.imports = self.imports.or(record.imports);
        record.exports = self.exports.or(record.exports);
        record
    }
}

impl PeriodAmountPatch {
    /// Applies the patch to `record`.
    #[must_use]
    pub fn apply(self, mut record: PeriodAmountRecord) -> PeriodAmountRecord {
        if let Some(v) = self.year {
            record.year = v;
        }
        if let Some(v) = self.quarter {
            record.quarter = v;
        }
        if let Some(v) = self.amount_billion {
            record.amount_billion = v;
        }
        if let Some(v) = self.is_active {
            record.is_active = v;
        }
        record
    }

    /// A patch that only flips the active flag.
    #[must_use]
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

impl TargetPatch {
    /// Applies the patch to `record`.
    #[must_use]
    pub fn apply(self, mut record: TargetRecord) -> TargetRecord {
        if let Some(v) = self.target_name {
            record.target_name = v;
        }
        if let Some(v) = self.target_description {
            record.target_description = Some(v);
        }
        if let Some(v) = self.target_percentage {
            record.target_percentage = Some(v);
        }
        if let Some(v) = self.source {
            record.source = Some(v);
        }
        record.trend.extend(self.append_trend);
        record.map.extend(self.append_map);
        record
    }
}
