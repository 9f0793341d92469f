//! Share validation primitives.
//!
//! These are the only place the numeric rules live. The wizards call them
//! one step at a time; the record composites in `composite` call them for a
//! whole record at the storage boundary.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::{Bound, ValidationError, ValidationErrors};
use super::taxonomy::{Sector, SubDetail};

/// Allowed absolute deviation when comparing a sum against 100.
///
/// Absorbs rounding from `amount = totalGdp * share / 100` conversions.
pub const SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Smallest accepted observation year.
pub const MIN_YEAR: i32 = 1900;

/// Largest accepted observation year.
pub const MAX_YEAR: i32 = 2100;

/// The closed percentage interval `[0, 100]`.
pub const PERCENT: Bound = Bound::Between {
    min: Decimal::ZERO,
    max: Decimal::ONE_HUNDRED,
};

/// Checks `value` against `bound`.
pub fn validate_bounds(field: &str, value: Decimal, bound: Bound) -> Result<(), ValidationError> {
    if bound.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            bound,
        })
    }
}

/// Checks that `value` is a percentage in `[0, 100]`.
pub fn validate_percentage(field: &str, value: Decimal) -> Result<(), ValidationError> {
    validate_bounds(field, value, PERCENT)
}

/// Checks that `year` lies in `[MIN_YEAR, MAX_YEAR]`.
pub fn validate_year(field: &str, year: i32) -> Result<(), ValidationError> {
    validate_bounds(
        field,
        Decimal::from(year),
        Bound::Between {
            min: Decimal::from(MIN_YEAR),
            max: Decimal::from(MAX_YEAR),
        },
    )
}

/// Sums `parts`, clamping at `Decimal::MAX` / `Decimal::MIN` instead of
/// overflowing. A clamped sum is never within tolerance of 100.
fn saturating_sum(parts: &[Decimal]) -> Decimal {
    parts
        .iter()
        .fold(Decimal::ZERO, |acc, part| acc.saturating_add(*part))
}

/// Checks that `parts` sum to 100 within `tolerance`.
///
/// On mismatch the error carries the computed sum, saturated on overflow.
pub fn validate_sum_to_100(parts: &[Decimal], tolerance: Decimal) -> Result<(), ValidationError> {
    let actual = saturating_sum(parts);
    if actual.saturating_sub(Decimal::ONE_HUNDRED).abs() <= tolerance {
        Ok(())
    } else {
        Err(ValidationError::SumMismatch { actual, tolerance })
    }
}

/// Checks that a partial set of shares leaves room for the rest: the sum
/// must not exceed 100 beyond `tolerance`.
pub fn validate_partial_sum(
    field: &str,
    parts: &[Decimal],
    tolerance: Decimal,
) -> Result<(), ValidationError> {
    let limit = Decimal::ONE_HUNDRED.saturating_add(tolerance);
    validate_bounds(field, saturating_sum(parts), Bound::AtMost(limit))
}

/// Checks that every key of `map` belongs to `sector`'s taxonomy.
///
/// An empty map passes only under `SubDetail::Optional`.
pub fn validate_subsector_keys(
    field: &str,
    map: &BTreeMap<String, Decimal>,
    sector: Sector,
    policy: SubDetail,
) -> Result<(), ValidationError> {
    if map.is_empty() {
        return match policy {
            SubDetail::Required => Err(ValidationError::missing(field)),
            SubDetail::Optional => Ok(()),
        };
    }

    let invalid: Vec<String> = map
        .keys()
        .filter(|key| !sector.contains(key))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidKey {
            field: field.to_string(),
            keys: invalid,
        })
    }
}

/// Checks a sector's sub-share map: taxonomy membership under the sector's
/// own policy, and every value in `[0, 100]`.
///
/// Sub-shares are not required to sum to the parent share.
pub fn validate_sub_shares(sector: Sector, map: &BTreeMap<String, Decimal>) -> ValidationErrors {
    let field = sector.sub_shares_field();
    let mut errors = ValidationErrors::new();

    errors.check(validate_subsector_keys(field, map, sector, sector.sub_detail()));
    for (name, value) in map {
        errors.check(validate_percentage(&format!("{field}.{name}"), *value));
    }

    errors
}

/// Joins a field prefix and name with a dot, or returns the name alone.
pub(crate) fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
