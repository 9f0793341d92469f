//! Wizard error types.

use std::time::Duration;

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::records::Record;
use crate::shares::ValidationErrors;

/// Errors returned by wizard transitions.
///
/// A rejected transition never changes the wizard: the step and the
/// entered data stay as they were.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The step's validation failed; the wizard stays on `step`.
    #[error("Step {step} rejected: {errors}")]
    StepRejected {
        /// The step that was validated.
        step: u8,
        /// Every reason the step failed.
        errors: ValidationErrors,
    },

    /// Submit was called before reaching the final step.
    #[error("Submit is only available on step {last}, wizard is on step {current}")]
    NotOnFinalStep {
        /// Current step.
        current: u8,
        /// Final step.
        last: u8,
    },

    /// The record gateway refused or failed a write.
    #[error("Submit failed after {} completed write(s): {source}", .completed.len())]
    SubmitFailed {
        /// The gateway failure.
        source: GatewayError,
        /// Writes of this submission that are stored, including those
        /// acknowledged by earlier attempts. A retry skips them.
        completed: Vec<Record>,
    },

    /// The gateway did not answer within the configured timeout.
    #[error("Submit did not complete within {after:?}")]
    TimedOut {
        /// The timeout that elapsed.
        after: Duration,
    },
}

impl WizardError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StepRejected { .. } => "STEP_REJECTED",
            Self::NotOnFinalStep { .. } => "NOT_ON_FINAL_STEP",
            Self::SubmitFailed { source, .. } => source.error_code(),
            Self::TimedOut { .. } => "SUBMIT_TIMED_OUT",
        }
    }

    /// Returns true if the user can fix the input and retry from the same
    /// screen. Storage failures and timeouts are reported as a failed save.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::StepRejected { .. } | Self::NotOnFinalStep { .. } => true,
            Self::SubmitFailed { source, .. } => source.is_user_correctable(),
            Self::TimedOut { .. } => false,
        }
    }

    /// Returns the validation failures behind this error, if any.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::StepRejected { errors, .. } => Some(errors),
            Self::SubmitFailed { source, .. } => source.validation_errors(),
            Self::NotOnFinalStep { .. } | Self::TimedOut { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shares::ValidationError;

    #[test]
    fn test_error_codes_and_recoverability() {
        let rejected = WizardError::StepRejected {
            step: 1,
            errors: ValidationError::missing("totalGdp").into(),
        };
        assert_eq!(rejected.error_code(), "STEP_REJECTED");
        assert!(rejected.is_recoverable());
        assert_eq!(rejected.to_string(), "Step 1 rejected: totalGdp is required");

        let storage = WizardError::SubmitFailed {
            source: GatewayError::storage("connection reset"),
            completed: Vec::new(),
        };
        assert_eq!(storage.error_code(), "STORAGE_ERROR");
        assert!(!storage.is_recoverable());
        assert_eq!(
            storage.to_string(),
            "Submit failed after 0 completed write(s): Storage error: connection reset"
        );

        let timed_out = WizardError::TimedOut {
            after: Duration::from_secs(30),
        };
        assert!(!timed_out.is_recoverable());
        assert!(timed_out.validation_errors().is_none());
    }
}
