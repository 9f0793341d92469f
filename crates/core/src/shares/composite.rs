//! Record-level validation composites.
//!
//! The storage boundary runs these on every create and update; the wizards
//! run them on final submit. Both sides share the primitives in
//! `validation`, so entry-time and store-time rules cannot drift apart.

use rust_decimal::Decimal;

use super::error::{Bound, ValidationError, ValidationErrors};
use super::taxonomy::Sector;
use super::validation::{
    SUM_TOLERANCE, field_path, validate_bounds, validate_percentage, validate_sub_shares,
    validate_sum_to_100, validate_year,
};
use crate::records::{PeriodAmountRecord, Quarter, RecordData, SectorShareRecord, TargetRecord};

/// Validates a whole sector share record.
///
/// Runs bounds checks on every share, the sum-to-100 check over
/// `[services, industry, agriculture, taxes]`, taxonomy checks on the three
/// sub-share maps, and range checks on the optional auxiliaries.
///
/// # Errors
///
/// Returns every violation found.
pub fn validate_share_record(record: &SectorShareRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_bounds("totalGdp", record.total_gdp, Bound::NonNegative));

    let [services, industry, agriculture, taxes] = record.shares();
    errors.check(validate_percentage("servicesShare", services));
    errors.check(validate_percentage("industryShare", industry));
    errors.check(validate_percentage("agricultureShare", agriculture));
    errors.check(validate_percentage("taxesShare", taxes));
    errors.check(validate_sum_to_100(&record.shares(), SUM_TOLERANCE));

    for sector in Sector::ALL {
        errors.extend(validate_sub_shares(sector, record.sub_shares(sector)));
    }

    let auxiliaries = [
        ("privateSector", record.private_sector),
        ("governmentSector", record.government_sector),
        ("imports", record.imports),
        ("exports", record.exports),
    ];
    for (field, value) in auxiliaries {
        if let Some(value) = value {
            errors.check(validate_percentage(field, value));
        }
    }

    errors.into_result()
}

/// Validates possibly-missing period fields under `prefix`.
///
/// Missing fields are reported as `MissingField`; present ones are range
/// checked (year in `[1900, 2100]`, amount > 0).
pub fn validate_period_fields(
    prefix: &str,
    year: Option<i32>,
    quarter: Option<Quarter>,
    amount_billion: Option<Decimal>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match year {
        Some(year) => errors.check(validate_year(&field_path(prefix, "year"), year)),
        None => errors.push(ValidationError::missing(field_path(prefix, "year"))),
    }
    if quarter.is_none() {
        errors.push(ValidationError::missing(field_path(prefix, "quarter")));
    }
    match amount_billion {
        Some(amount) => errors.check(validate_bounds(
            &field_path(prefix, "amountBillionRwf"),
            amount,
            Bound::Positive,
        )),
        None => errors.push(ValidationError::missing(field_path(
            prefix,
            "amountBillionRwf",
        ))),
    }

    errors
}

/// Validates a whole period amount record.
///
/// # Errors
///
/// Returns every violation found.
pub fn validate_period_amount(record: &PeriodAmountRecord) -> Result<(), ValidationErrors> {
    validate_period_fields(
        "",
        Some(record.year),
        Some(record.quarter),
        Some(record.amount_billion),
    )
    .into_result()
}

/// Checks that `current` is strictly later than `previous`.
pub fn validate_period_ordering(
    field: &str,
    previous: i32,
    current: i32,
) -> Result<(), ValidationError> {
    if current > previous {
        Ok(())
    } else {
        Err(ValidationError::OrderingViolation {
            field: field.to_string(),
            previous,
            current,
        })
    }
}

/// Validates a whole target record, including every series point.
///
/// # Errors
///
/// Returns every violation found.
pub fn validate_target(record: &TargetRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if record.target_name.trim().is_empty() {
        errors.push(ValidationError::missing("targetName"));
    }
    if let Some(percentage) = record.target_percentage {
        errors.check(validate_percentage("targetPercentage", percentage));
    }

    for (i, point) in record.trend.iter().enumerate() {
        let prefix = format!("trend[{i}]");
        errors.check(validate_year(&field_path(&prefix, "year"), point.year));
        errors.check(validate_percentage(
            &field_path(&prefix, "percentage"),
            point.percentage,
        ));
    }

    for (i, point) in record.map.iter().enumerate() {
        let prefix = format!("map[{i}]");
        errors.check(validate_year(&field_path(&prefix, "year"), point.year));
        if point.location.trim().is_empty() {
            errors.push(ValidationError::missing(field_path(&prefix, "location")));
        }
        errors.check(validate_percentage(
            &field_path(&prefix, "povertyRate"),
            point.poverty_rate,
        ));
    }

    errors.into_result()
}

/// Runs the composite for the payload's kind.
///
/// # Errors
///
/// Returns every violation found.
pub fn validate_record(data: &RecordData) -> Result<(), ValidationErrors> {
    match data {
        RecordData::SectorShare(record) => validate_share_record(record),
        RecordData::PeriodAmount(record) => validate_period_amount(record),
        RecordData::Target(record) => validate_target(record),
    }
}
