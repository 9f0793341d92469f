//! Record gateway error types.

use indicata_shared::AppError;
use indicata_shared::types::RecordId;
use thiserror::Error;

use crate::records::{KindMismatch, RecordKind};
use crate::shares::ValidationErrors;

/// Errors returned by a record gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The candidate payload broke one or more rules.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No record of `kind` has the given id.
    #[error("{kind} record not found: {id}")]
    NotFound {
        /// Kind that was searched.
        kind: RecordKind,
        /// The missing id.
        id: RecordId,
    },

    /// A patch or operation targeted the wrong kind.
    #[error(transparent)]
    KindMismatch(#[from] KindMismatch),

    /// An activation was requested for a kind without an active flag.
    #[error("{0} records have no active flag")]
    NoActiveFlag(RecordKind),

    /// The persistence boundary failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Backend message.
        message: String,
        /// True for transaction conflicts (serialization failures, the
        /// single-active index rejecting a concurrent writer).
        conflict: bool,
    },
}

impl GatewayError {
    /// Creates a non-conflict storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            conflict: false,
        }
    }

    /// Creates a conflict storage error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            conflict: true,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::KindMismatch(_) => "KIND_MISMATCH",
            Self::NoActiveFlag(_) => "NO_ACTIVE_FLAG",
            Self::Storage {
                conflict: true, ..
            } => "CONCURRENT_MODIFICATION",
            Self::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::KindMismatch(_) | Self::NoActiveFlag(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Storage { conflict: true, .. } => 409,
            Self::Storage { .. } => 500,
        }
    }

    /// Returns true if the user can correct the input and resubmit.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this error is retryable. No retry is performed
    /// automatically; the caller decides.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { conflict: true, .. })
    }

    /// Returns the validation failures, if this is a validation error.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for GatewayError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::Validation(_)
            | GatewayError::KindMismatch(_)
            | GatewayError::NoActiveFlag(_) => Self::Validation(err.to_string()),
            GatewayError::NotFound { .. } => Self::NotFound(err.to_string()),
            GatewayError::Storage { conflict: true, .. } => Self::Conflict(err.to_string()),
            GatewayError::Storage { .. } => Self::Database(err.to_string()),
        }
    }
}
