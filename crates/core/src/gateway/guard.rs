//! Store-side validation.
//!
//! Runs the same composites the wizards run on submit, so a payload that
//! bypassed the wizard is held to identical rules.

use crate::records::{Record, RecordData, RecordKind, RecordPatch};
use crate::shares::validate_record;

use super::error::GatewayError;

/// Stateless checks every gateway runs before writing.
pub struct RecordGuard;

impl RecordGuard {
    /// Validates a payload about to be created.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Validation` with every violation found.
    pub fn check_create(data: &RecordData) -> Result<(), GatewayError> {
        validate_record(data)?;
        Ok(())
    }

    /// Applies `patch` to `current` and validates the candidate payload.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if the patch or the stored record is not of
    /// `kind`, or `Validation` if the candidate breaks a rule.
    pub fn check_update(
        kind: RecordKind,
        current: &Record,
        patch: RecordPatch,
    ) -> Result<RecordData, GatewayError> {
        if patch.kind() != kind {
            return Err(crate::records::KindMismatch {
                patch: patch.kind(),
                record: kind,
            }
            .into());
        }

        let candidate = patch.apply(current.data.clone())?;
        validate_record(&candidate)?;
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{PeriodAmountPatch, PeriodAmountRecord, Quarter, TargetPatch};
    use chrono::Utc;
    use indicata_shared::types::RecordId;
    use rust_decimal_macros::dec;

    fn stored(data: RecordData) -> Record {
        Record {
            id: RecordId::new(),
            data,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_create_rejects_invalid() {
        let data = PeriodAmountRecord::new(2024, Quarter::Q1, dec!(-5)).into();
        let err = RecordGuard::check_create(&data).unwrap_err();
        assert!(err.is_user_correctable());
    }

    #[test]
    fn test_check_update_validates_candidate() {
        let current = stored(PeriodAmountRecord::new(2024, Quarter::Q1, dec!(100)).into());
        let patch = RecordPatch::PeriodAmount(PeriodAmountPatch {
            year: Some(3000),
            ..PeriodAmountPatch::default()
        });
        let err = RecordGuard::check_update(RecordKind::PeriodAmount, &current, patch).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_check_update_rejects_wrong_kind() {
        let current = stored(PeriodAmountRecord::new(2024, Quarter::Q1, dec!(100)).into());
        let err = RecordGuard::check_update(
            RecordKind::PeriodAmount,
            &current,
            RecordPatch::Target(TargetPatch::default()),
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::KindMismatch(_)));
    }

    #[test]
    fn test_check_update_returns_candidate() {
        let current = stored(PeriodAmountRecord::new(2024, Quarter::Q1, dec!(100)).into());
        let candidate = RecordGuard::check_update(
            RecordKind::PeriodAmount,
            &current,
            RecordPatch::PeriodAmount(PeriodAmountPatch::active(true)),
        )
        .unwrap();
        assert_eq!(candidate.is_active(), Some(true));
    }
}
