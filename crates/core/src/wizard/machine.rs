//! The step wizard state machine.
//!
//! A wizard owns one form value and a current step in `[1, N]`. Forward
//! navigation is gated on the current step's validation; going back is
//! always allowed. Submit is only available on the final step and, once the
//! gateway accepts every write, resets the wizard.
//!
//! A submit that fails partway remembers the writes the gateway already
//! acknowledged. Retrying skips them as long as the form still produces the
//! same leading writes, so a retry never stores the same record twice.

use std::time::Duration;

use indicata_shared::types::RecordId;

use super::error::WizardError;
use crate::gateway::{GatewayError, RecordGateway};
use crate::records::{Record, RecordData, RecordKind, RecordPatch};
use crate::shares::ValidationErrors;

/// A form driven by a `StepWizard`.
pub trait WizardForm: Clone + Send + Sync {
    /// Number of steps (N >= 1).
    const STEPS: u8;

    /// Validates the fields collected on `step`.
    fn validate_step(&self, step: u8) -> ValidationErrors;

    /// Cumulative validation run on submit.
    ///
    /// Defaults to every step's validation, so fields edited after their
    /// step was passed are still caught.
    fn validate_all(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for step in 1..=Self::STEPS {
            errors.extend(self.validate_step(step));
        }
        errors
    }

    /// The gateway writes a valid form turns into, in order.
    ///
    /// # Errors
    ///
    /// Returns the missing fields if the form is incomplete.
    fn submission(&self) -> Result<Vec<SubmitOp>, ValidationErrors>;
}

/// One gateway write produced by a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOp {
    /// Create a record.
    Create(RecordData),
    /// Patch an existing record.
    Update {
        /// Kind of the record.
        kind: RecordKind,
        /// Record to patch.
        id: RecordId,
        /// The edit.
        patch: RecordPatch,
    },
}

impl SubmitOp {
    /// Sends this write through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns whatever the gateway returns.
    pub async fn apply(self, gateway: &dyn RecordGateway) -> Result<Record, GatewayError> {
        match self {
            Self::Create(data) => gateway.create(data).await,
            Self::Update { kind, id, patch } => gateway.update(kind, id, patch).await,
        }
    }
}

/// Step-gated data-entry state machine over a form `F`.
#[derive(Debug, Clone)]
pub struct StepWizard<F> {
    current_step: u8,
    form: F,
    initial: F,
    acknowledged: Vec<(SubmitOp, Record)>,
}

impl<F: WizardForm + Default> Default for StepWizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: WizardForm> StepWizard<F> {
    /// Creates a wizard on step 1 with an empty form.
    #[must_use]
    pub fn new() -> Self
    where
        F: Default,
    {
        Self::with_initial(F::default())
    }

    /// Creates a wizard on step 1 whose reset state is `initial`.
    #[must_use]
    pub fn with_initial(initial: F) -> Self {
        Self {
            current_step: 1,
            form: initial.clone(),
            initial,
            acknowledged: Vec::new(),
        }
    }

    /// Current step, in `[1, N]`.
    #[must_use]
    pub const fn current_step(&self) -> u8 {
        self.current_step
    }

    /// Number of steps.
    #[must_use]
    pub const fn total_steps(&self) -> u8 {
        F::STEPS
    }

    /// `(current, total)`, for progress indicators.
    #[must_use]
    pub const fn progress(&self) -> (u8, u8) {
        (self.current_step, F::STEPS)
    }

    /// Returns true on the final step.
    #[must_use]
    pub const fn is_last_step(&self) -> bool {
        self.current_step == F::STEPS
    }

    /// Read-only view of the entered data.
    #[must_use]
    pub const fn form(&self) -> &F {
        &self.form
    }

    /// Edits the entered data. The step does not change.
    pub fn update(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.form);
    }

    /// Validates the current step without moving.
    ///
    /// # Errors
    ///
    /// Returns every reason the step would be rejected.
    pub fn check_current(&self) -> Result<(), ValidationErrors> {
        self.form.validate_step(self.current_step).into_result()
    }

    /// Validates the current step and, if it passes, advances one step
    /// (capped at N). Returns the new current step.
    ///
    /// # Errors
    ///
    /// Returns `StepRejected` and stays on the current step if validation
    /// fails.
    pub fn next(&mut self) -> Result<u8, WizardError> {
        self.check_current()
            .map_err(|errors| WizardError::StepRejected {
                step: self.current_step,
                errors,
            })?;

        if self.current_step < F::STEPS {
            self.current_step += 1;
        }
        Ok(self.current_step)
    }

    /// Goes back one step (floored at 1) without validating. Returns the new
    /// current step.
    pub fn previous(&mut self) -> u8 {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
        self.current_step
    }

    /// Records stored by an earlier submit that failed partway.
    ///
    /// Empty after a successful submit or a reset.
    #[must_use]
    pub fn acknowledged(&self) -> impl Iterator<Item = &Record> {
        self.acknowledged.iter().map(|(_, record)| record)
    }

    /// Restores the initial data and returns to step 1.
    ///
    /// Forgets acknowledged writes: a submit after a reset starts over.
    pub fn reset(&mut self) {
        self.form = self.initial.clone();
        self.current_step = 1;
        self.acknowledged.clear();
    }

    /// Submits without a timeout. See [`StepWizard::submit_with_timeout`].
    ///
    /// # Errors
    ///
    /// See [`StepWizard::submit_with_timeout`].
    pub async fn submit(&mut self, gateway: &dyn RecordGateway) -> Result<Vec<Record>, WizardError> {
        self.submit_with_timeout(gateway, None).await
    }

    /// Validates the final step and the whole form, sends the submission
    /// through `gateway`, and resets on success.
    ///
    /// On any failure the step and the entered data are left as they were,
    /// including when `timeout` elapses or the returned future is dropped.
    /// Writes already acknowledged by the gateway are not rolled back; they
    /// are remembered, and the next submit skips every leading write that is
    /// unchanged since it was acknowledged. On success the returned records
    /// include those from earlier attempts, in submission order.
    ///
    /// # Errors
    ///
    /// - `NotOnFinalStep` when called before step N
    /// - `StepRejected` when step N or the cumulative validation fails
    /// - `SubmitFailed` when the gateway refuses a write
    /// - `TimedOut` when `timeout` elapses first
    pub async fn submit_with_timeout(
        &mut self,
        gateway: &dyn RecordGateway,
        timeout: Option<Duration>,
    ) -> Result<Vec<Record>, WizardError> {
        if !self.is_last_step() {
            return Err(WizardError::NotOnFinalStep {
                current: self.current_step,
                last: F::STEPS,
            });
        }

        let rejected = |errors| WizardError::StepRejected {
            step: F::STEPS,
            errors,
        };

        let mut errors = self.form.validate_step(F::STEPS);
        errors.extend(self.form.validate_all());
        errors.into_result().map_err(rejected)?;
        let mut ops = self.form.submission().map_err(rejected)?;

        let stored = self
            .acknowledged
            .iter()
            .zip(&ops)
            .take_while(|((done, _), op)| done == *op)
            .count();
        self.acknowledged.truncate(stored);
        let pending = ops.split_off(stored);

        let writes = apply_all(gateway, pending, &mut self.acknowledged);
        match timeout {
            Some(after) => tokio::time::timeout(after, writes)
                .await
                .map_err(|_| WizardError::TimedOut { after })??,
            None => writes.await?,
        }

        let records = self
            .acknowledged
            .drain(..)
            .map(|(_, record)| record)
            .collect();
        self.reset();
        Ok(records)
    }
}

/// Applies `ops` in order, appending each acknowledged write to
/// `acknowledged` and stopping at the first failure.
async fn apply_all(
    gateway: &dyn RecordGateway,
    ops: Vec<SubmitOp>,
    acknowledged: &mut Vec<(SubmitOp, Record)>,
) -> Result<(), WizardError> {
    for op in ops {
        match op.clone().apply(gateway).await {
            Ok(record) => acknowledged.push((op, record)),
            Err(source) => {
                let completed = acknowledged.iter().map(|(_, record)| record.clone()).collect();
                return Err(WizardError::SubmitFailed { source, completed });
            }
        }
    }
    Ok(())
}
