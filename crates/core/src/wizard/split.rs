//! Private/government and trade split entry.
//!
//! The four values are independent measurements, not a partition, so there
//! is no sum requirement. They are attached to an existing sector share
//! record.

use indicata_shared::types::RecordId;
use rust_decimal::Decimal;

use super::machine::{SubmitOp, WizardForm};
use crate::records::{RecordKind, RecordPatch, SectorSharePatch};
use crate::shares::{ValidationError, ValidationErrors, validate_percentage};

/// Two-step split form: private/government, then imports/exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorSplitForm {
    /// Sector share record the split belongs to.
    pub record_id: Option<RecordId>,
    /// Private sector share.
    pub private_sector: Option<Decimal>,
    /// Government sector share.
    pub government_sector: Option<Decimal>,
    /// Imports share.
    pub imports: Option<Decimal>,
    /// Exports share.
    pub exports: Option<Decimal>,
}

impl SectorSplitForm {
    /// An empty form targeting record `id`.
    #[must_use]
    pub fn for_record(id: RecordId) -> Self {
        Self {
            record_id: Some(id),
            ..Self::default()
        }
    }

    fn validate_pair(pair: [(&str, Option<Decimal>); 2]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, value) in pair {
            match value {
                Some(value) => errors.check(validate_percentage(field, value)),
                None => errors.push(ValidationError::missing(field)),
            }
        }
        errors
    }
}

impl WizardForm for SectorSplitForm {
    const STEPS: u8 = 2;

    fn validate_step(&self, step: u8) -> ValidationErrors {
        match step {
            1 => Self::validate_pair([
                ("privateSector", self.private_sector),
                ("governmentSector", self.government_sector),
            ]),
            2 => Self::validate_pair([("imports", self.imports), ("exports", self.exports)]),
            _ => ValidationErrors::new(),
        }
    }

    fn validate_all(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.record_id.is_none() {
            errors.push(ValidationError::missing("recordId"));
        }
        for step in 1..=Self::STEPS {
            errors.extend(self.validate_step(step));
        }
        errors
    }

    fn submission(&self) -> Result<Vec<SubmitOp>, ValidationErrors> {
        let id = self
            .record_id
            .ok_or_else(|| ValidationErrors::from(ValidationError::missing("recordId")))?;

        let patch = SectorSharePatch {
            private_sector: self.private_sector,
            government_sector: self.government_sector,
            imports: self.imports,
            exports: self.exports,
            ..SectorSharePatch::default()
        };

        Ok(vec![SubmitOp::Update {
            kind: RecordKind::SectorShare,
            id,
            patch: RecordPatch::SectorShare(patch),
        }])
    }
}
