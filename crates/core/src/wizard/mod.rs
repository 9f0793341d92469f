//! Step-by-step data-entry wizards.
//!
//! - `machine` - The generic step state machine and the `WizardForm` trait
//! - `gdp` - Previous and current GDP period amounts
//! - `sector` - Sector shares and their breakdowns
//! - `split` - Private/government and trade split for a stored record

pub mod error;
pub mod gdp;
pub mod machine;
pub mod sector;
pub mod split;

#[cfg(test)]
mod machine_props;

pub use error::WizardError;
pub use gdp::{GdpAmountForm, PeriodEntry};
pub use machine::{StepWizard, SubmitOp, WizardForm};
pub use sector::SectorShareForm;
pub use split::SectorSplitForm;
