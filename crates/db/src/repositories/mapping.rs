//! Conversions between stored rows and domain records.

use chrono::{DateTime, Utc};
use indicata_core::gateway::GatewayError;
use indicata_core::records::{
    MapPoint, PeriodAmountRecord, Quarter, Record, SectorShareRecord, SubShares,
    TargetRecord, TrendPoint,
};
use indicata_shared::types::RecordId;
use sea_orm::{DbErr, NotSet, RuntimeErr, Set, SqlErr, sqlx};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entities::{period_amounts, sector_shares, targets};

/// SQLSTATE codes for transaction conflicts the caller may retry.
const CONFLICT_SQLSTATES: [&str; 2] = ["40001", "40P01"];

/// Maps a database error to a gateway storage error.
///
/// Unique violations (the single-active index) and serialization or
/// deadlock failures are reported as conflicts.
pub fn storage_error(err: DbErr) -> GatewayError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        return GatewayError::conflict(message);
    }
    if is_transaction_conflict(&err) {
        return GatewayError::conflict(err.to_string());
    }
    GatewayError::storage(err.to_string())
}

fn is_transaction_conflict(err: &DbErr) -> bool {
    let (DbErr::Exec(runtime) | DbErr::Query(runtime) | DbErr::Conn(runtime)) = err else {
        return false;
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db)) => db
            .code()
            .is_some_and(|code| CONFLICT_SQLSTATES.iter().any(|state| *state == code)),
        _ => false,
    }
}

fn to_json<T: Serialize>(field: &str, value: &T) -> Result<serde_json::Value, GatewayError> {
    serde_json::to_value(value)
        .map_err(|e| GatewayError::storage(format!("Cannot encode {field}: {e}")))
}

fn from_json<T: DeserializeOwned>(field: &str, value: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(value)
        .map_err(|e| GatewayError::storage(format!("Corrupt {field} column: {e}")))
}

fn utc(at: sea_orm::prelude::DateTimeWithTimeZone) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

impl sector_shares::Model {
    /// Converts the row into a domain record.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a JSON column does not decode.
    pub fn into_record(self) -> Result<Record, GatewayError> {
        let data = SectorShareRecord {
            total_gdp: self.total_gdp,
            services_share: self.services_share,
            industry_share: self.industry_share,
            agriculture_share: self.agriculture_share,
            taxes_share: self.taxes_share,
            services_sub_shares: from_json::<SubShares>(
                "services_sub_shares",
                self.services_sub_shares,
            )?,
            agriculture_sub_shares: from_json("agriculture_sub_shares", self.agriculture_sub_shares)?,
            industry_sub_shares: from_json("industry_sub_shares", self.industry_sub_shares)?,
            private_sector: self.private_sector,
            government_sector: self.government_sector,
            imports: self.imports,
            exports: self.exports,
        };

        Ok(Record {
            id: RecordId::from_uuid(self.id),
            data: data.into(),
            created_at: utc(self.created_at),
            updated_at: utc(self.updated_at),
        })
    }
}

impl period_amounts::Model {
    /// Converts the row into a domain record.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the quarter column is not `Q1`..`Q4`.
    pub fn into_record(self) -> Result<Record, GatewayError> {
        let quarter: Quarter = self
            .quarter
            .parse()
            .map_err(|e| GatewayError::storage(format!("Corrupt quarter column: {e}")))?;

        let data = PeriodAmountRecord {
            year: self.year,
            quarter,
            amount_billion: self.amount_billion,
            is_active: self.is_active,
        };

        Ok(Record {
            id: RecordId::from_uuid(self.id),
            data: data.into(),
            created_at: utc(self.created_at),
            updated_at: utc(self.updated_at),
        })
    }
}

impl targets::Model {
    /// Converts the row into a domain record.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a series column does not decode.
    pub fn into_record(self) -> Result<Record, GatewayError> {
        let data = TargetRecord {
            target_name: self.target_name,
            target_description: self.target_description,
            target_percentage: self.target_percentage,
            source: self.source,
            trend: from_json::<Vec<TrendPoint>>("trend", self.trend)?,
            map: from_json::<Vec<MapPoint>>("map", self.map)?,
        };

        Ok(Record {
            id: RecordId::from_uuid(self.id),
            data: data.into(),
            created_at: utc(self.created_at),
            updated_at: utc(self.updated_at),
        })
    }
}

/// Row timestamps for a write. `created_at` is only set on insert.
#[derive(Debug, Clone, Copy)]
pub struct WriteStamp {
    now: DateTime<Utc>,
    insert: bool,
}

impl WriteStamp {
    /// Stamp for a new row.
    #[must_use]
    pub const fn insert(now: DateTime<Utc>) -> Self {
        Self { now, insert: true }
    }

    /// Stamp for an existing row.
    #[must_use]
    pub const fn update(now: DateTime<Utc>) -> Self {
        Self { now, insert: false }
    }

    fn created_at(self) -> sea_orm::ActiveValue<sea_orm::prelude::DateTimeWithTimeZone> {
        if self.insert {
            Set(self.now.into())
        } else {
            NotSet
        }
    }
}

/// Builds the active model for a sector share row.
///
/// # Errors
///
/// Returns a storage error if a sub-share map cannot be encoded.
pub fn sector_share_model(
    id: RecordId,
    data: &SectorShareRecord,
    stamp: WriteStamp,
) -> Result<sector_shares::ActiveModel, GatewayError> {
    Ok(sector_shares::ActiveModel {
        id: Set(id.into_inner()),
        total_gdp: Set(data.total_gdp),
        services_share: Set(data.services_share),
        industry_share: Set(data.industry_share),
        agriculture_share: Set(data.agriculture_share),
        taxes_share: Set(data.taxes_share),
        services_sub_shares: Set(to_json("services_sub_shares", &data.services_sub_shares)?),
        agriculture_sub_shares: Set(to_json(
            "agriculture_sub_shares",
            &data.agriculture_sub_shares,
        )?),
        industry_sub_shares: Set(to_json("industry_sub_shares", &data.industry_sub_shares)?),
        private_sector: Set(data.private_sector),
        government_sector: Set(data.government_sector),
        imports: Set(data.imports),
        exports: Set(data.exports),
        created_at: stamp.created_at(),
        updated_at: Set(stamp.now.into()),
    })
}

/// Builds the active model for a period amount row.
#[must_use]
pub fn period_amount_model(
    id: RecordId,
    data: &PeriodAmountRecord,
    stamp: WriteStamp,
) -> period_amounts::ActiveModel {
    period_amounts::ActiveModel {
        id: Set(id.into_inner()),
        year: Set(data.year),
        quarter: Set(data.quarter.as_str().to_string()),
        amount_billion: Set(data.amount_billion),
        is_active: Set(data.is_active),
        created_at: stamp.created_at(),
        updated_at: Set(stamp.now.into()),
    }
}

/// Builds the active model for a target row.
///
/// # Errors
///
/// Returns a storage error if a series cannot be encoded.
pub fn target_model(
    id: RecordId,
    data: &TargetRecord,
    stamp: WriteStamp,
) -> Result<targets::ActiveModel, GatewayError> {
    Ok(targets::ActiveModel {
        id: Set(id.into_inner()),
        target_name: Set(data.target_name.clone()),
        target_description: Set(data.target_description.clone()),
        target_percentage: Set(data.target_percentage),
        source: Set(data.source.clone()),
        trend: Set(to_json("trend", &data.trend)?),
        map: Set(to_json("map", &data.map)?),
        created_at: stamp.created_at(),
        updated_at: Set(stamp.now.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn share_row() -> sector_shares::Model {
        let now = Utc::now().into();
        sector_shares::Model {
            id: RecordId::new().into_inner(),
            total_gdp: dec!(5255),
            services_share: dec!(46),
            industry_share: dec!(23),
            agriculture_share: dec!(24),
            taxes_share: dec!(7),
            services_sub_shares: serde_json::json!({ "ICT": "3.10", "Trade": "12.5" }),
            agriculture_sub_shares: serde_json::json!({}),
            industry_sub_shares: serde_json::json!({}),
            private_sector: Some(dec!(80)),
            government_sector: None,
            imports: None,
            exports: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sector_share_row_keeps_decimal_scale() {
        let record = share_row().into_record().unwrap();
        let data = record.data.as_sector_share().unwrap();

        let ict = data.services_sub_shares.get("ICT").unwrap();
        assert_eq!(*ict, dec!(3.10));
        assert_eq!(ict.scale(), 2);
        assert_eq!(data.private_sector, Some(dec!(80)));
    }

    #[test]
    fn test_corrupt_sub_shares_is_storage_error() {
        let mut row = share_row();
        row.industry_sub_shares = serde_json::json!([1, 2]);

        let err = row.into_record().unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_period_row_parses_quarter() {
        let now = Utc::now().into();
        let row = period_amounts::Model {
            id: RecordId::new().into_inner(),
            year: 2024,
            quarter: "Q3".to_string(),
            amount_billion: dec!(4120.5),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let record = row.into_record().unwrap();
        assert!(record.is_active());
        assert_eq!(
            record.data.as_period_amount().unwrap().quarter,
            Quarter::Q3
        );
    }

    #[test]
    fn test_period_row_rejects_unknown_quarter() {
        let now = Utc::now().into();
        let row = period_amounts::Model {
            id: RecordId::new().into_inner(),
            year: 2024,
            quarter: "Q5".to_string(),
            amount_billion: dec!(1),
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        assert!(row.into_record().is_err());
    }

    #[test]
    fn test_update_stamp_leaves_created_at_unset() {
        let data = PeriodAmountRecord::new(2024, Quarter::Q1, dec!(10));
        let model = period_amount_model(RecordId::new(), &data, WriteStamp::update(Utc::now()));
        assert!(model.created_at.is_not_set());
        assert!(model.updated_at.is_set());
    }

    #[test]
    fn test_target_model_encodes_series() {
        let mut data = TargetRecord::new("Poverty headcount");
        data.trend.push(TrendPoint {
            year: 2017,
            percentage: dec!(38.2),
        });

        let model = target_model(RecordId::new(), &data, WriteStamp::insert(Utc::now())).unwrap();
        let trend = model.trend.unwrap();
        assert_eq!(trend[0]["percentage"], "38.2");
        assert_eq!(trend[0]["year"], 2017);
    }

    #[test]
    fn test_plain_db_error_is_not_conflict() {
        let err = storage_error(DbErr::Custom("connection refused".to_string()));
        assert!(matches!(err, GatewayError::Storage { conflict: false, .. }));
        assert!(!err.is_retryable());
    }
}
