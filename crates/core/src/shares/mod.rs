//! Share validation rules.
//!
//! This module implements the single rule table used on both sides of the
//! system:
//! - Percentage bounds and the 0.01 sum tolerance
//! - Sum-to-100 over the four top-level shares
//! - Fixed sub-sector taxonomy membership
//! - Record-level composites for every stored kind

pub mod composite;
pub mod error;
pub mod taxonomy;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use composite::{
    validate_period_amount, validate_period_fields, validate_period_ordering, validate_record,
    validate_share_record, validate_target,
};
pub use error::{Bound, ValidationError, ValidationErrors};
pub use taxonomy::{
    AGRICULTURE_SUBSECTORS, INDUSTRY_SUBSECTORS, SERVICES_SUBSECTORS, Sector, SubDetail,
};
pub use validation::{
    MAX_YEAR, MIN_YEAR, PERCENT, SUM_TOLERANCE, validate_bounds, validate_partial_sum,
    validate_percentage, validate_sub_shares, validate_subsector_keys, validate_sum_to_100,
    validate_year,
};
