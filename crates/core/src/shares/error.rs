//! Validation error types shared by the wizards and the storage boundary.
//!
//! Every variant here is recoverable: it blocks a step transition or a
//! write, and carries enough detail for the user to correct the input.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// The bound a numeric field was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Closed interval `[min, max]`.
    Between {
        /// Lower bound (inclusive).
        min: Decimal,
        /// Upper bound (inclusive).
        max: Decimal,
    },
    /// Strictly greater than zero.
    Positive,
    /// Zero or greater.
    NonNegative,
    /// At most the given value.
    AtMost(Decimal),
}

impl Bound {
    /// Returns true if `value` satisfies the bound.
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        match *self {
            Self::Between { min, max } => value >= min && value <= max,
            Self::Positive => value > Decimal::ZERO,
            Self::NonNegative => value >= Decimal::ZERO,
            Self::AtMost(max) => value <= max,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Between { min, max } => write!(f, "between {min} and {max}"),
            Self::Positive => write!(f, "greater than 0"),
            Self::NonNegative => write!(f, "0 or greater"),
            Self::AtMost(max) => write!(f, "at most {max}"),
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or empty.
    #[error("{field} is required")]
    MissingField {
        /// Wire name of the field.
        field: String,
    },

    /// A numeric field falls outside its declared bound.
    #[error("{field} must be {bound}, got {value}")]
    OutOfRange {
        /// Wire name of the field.
        field: String,
        /// The offending value.
        value: Decimal,
        /// The bound it violated.
        bound: Bound,
    },

    /// A set of shares does not sum to 100 within tolerance.
    #[error("Shares must sum to 100 (tolerance {tolerance}), got {actual}")]
    SumMismatch {
        /// The computed sum.
        actual: Decimal,
        /// Allowed absolute deviation.
        tolerance: Decimal,
    },

    /// A sub-share map contains keys outside its sector taxonomy.
    #[error("{field} contains unknown sub-sectors: {}", keys.join(", "))]
    InvalidKey {
        /// Wire name of the sub-share map.
        field: String,
        /// The rejected keys, in map order.
        keys: Vec<String>,
    },

    /// A current-period value is not strictly later than the previous one.
    #[error("{field} must be later than {previous}, got {current}")]
    OrderingViolation {
        /// Wire name of the later field.
        field: String,
        /// The previous-period value.
        previous: i32,
        /// The current-period value.
        current: i32,
    },
}

impl ValidationError {
    /// Creates a `MissingField` error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::SumMismatch { .. } => "SUM_MISMATCH",
            Self::InvalidKey { .. } => "INVALID_KEY",
            Self::OrderingViolation { .. } => "ORDERING_VIOLATION",
        }
    }

    /// Returns the field this error is attached to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidKey { field, .. }
            | Self::OrderingViolation { field, .. } => Some(field),
            Self::SumMismatch { .. } => None,
        }
    }
}

/// Every rule violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a violation. A violation already recorded is not repeated.
    pub fn push(&mut self, error: ValidationError) {
        if !self.0.contains(&error) {
            self.0.push(error);
        }
    }

    /// Records the violation from `result`, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    /// Absorbs another collection.
    pub fn extend(&mut self, other: Self) {
        for error in other.0 {
            self.push(error);
        }
    }

    /// Returns true if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded violations.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns true if any violation has the given error code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.error_code() == code)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Consumes the collection, returning the violations.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
