//! GDP amount entry: previous period, then current period.

use rust_decimal::Decimal;

use super::machine::{SubmitOp, WizardForm};
use crate::records::{PeriodAmountRecord, Quarter};
use crate::shares::{
    ValidationError, ValidationErrors, validate_period_fields, validate_period_ordering,
};

/// One period as entered; any field may still be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodEntry {
    /// Observation year.
    pub year: Option<i32>,
    /// Observation quarter.
    pub quarter: Option<Quarter>,
    /// Amount in billions.
    pub amount_billion: Option<Decimal>,
}

impl PeriodEntry {
    /// A fully filled entry.
    #[must_use]
    pub const fn new(year: i32, quarter: Quarter, amount_billion: Decimal) -> Self {
        Self {
            year: Some(year),
            quarter: Some(quarter),
            amount_billion: Some(amount_billion),
        }
    }

    fn validate(&self, prefix: &str) -> ValidationErrors {
        validate_period_fields(prefix, self.year, self.quarter, self.amount_billion)
    }

    fn to_record(&self, prefix: &str) -> Result<PeriodAmountRecord, ValidationErrors> {
        match (self.year, self.quarter, self.amount_billion) {
            (Some(year), Some(quarter), Some(amount)) => {
                Ok(PeriodAmountRecord::new(year, quarter, amount))
            }
            _ => Err(self.validate(prefix)),
        }
    }
}

/// Two-step GDP amount form.
///
/// Step 1 takes the previous period, step 2 the current period, which must
/// fall in a strictly later year. Submitting stores both observations and
/// makes the current one active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GdpAmountForm {
    /// Previous period.
    pub last_year: PeriodEntry,
    /// Current period.
    pub current_year: PeriodEntry,
}

const LAST: &str = "lastYear";
const CURRENT: &str = "currentYear";

impl WizardForm for GdpAmountForm {
    const STEPS: u8 = 2;

    fn validate_step(&self, step: u8) -> ValidationErrors {
        match step {
            1 => self.last_year.validate(LAST),
            2 => {
                let mut errors = self.current_year.validate(CURRENT);
                if let (Some(previous), Some(current)) = (self.last_year.year, self.current_year.year)
                {
                    errors.check(validate_period_ordering(
                        &format!("{CURRENT}.year"),
                        previous,
                        current,
                    ));
                }
                errors
            }
            _ => ValidationErrors::new(),
        }
    }

    fn submission(&self) -> Result<Vec<SubmitOp>, ValidationErrors> {
        let previous = self.last_year.to_record(LAST)?;
        let current = self.current_year.to_record(CURRENT)?.activated();
        Ok(vec![
            SubmitOp::Create(previous.into()),
            SubmitOp::Create(current.into()),
        ])
    }
}

impl GdpAmountForm {
    /// Returns true if the current year does not follow the previous one.
    #[must_use]
    pub fn has_ordering_violation(&self) -> bool {
        self.validate_step(2)
            .iter()
            .any(|e| matches!(e, ValidationError::OrderingViolation { .. }))
    }
}
