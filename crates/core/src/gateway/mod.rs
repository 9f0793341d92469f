//! The record gateway contract.
//!
//! The wizards and the dashboards talk to storage only through
//! `RecordGateway`. Every implementation must run `RecordGuard` before it
//! touches storage, whether or not the caller validated already, and must
//! keep at most one active record per kind that carries an active flag.
//!
//! - `error` - Gateway error taxonomy
//! - `guard` - Store-side validation shared by all implementations
//! - `memory` - In-memory implementation for development and tests

pub mod error;
pub mod guard;
pub mod memory;

use async_trait::async_trait;
use indicata_shared::types::RecordId;

pub use error::GatewayError;
pub use guard::RecordGuard;
pub use memory::InMemoryGateway;

use crate::records::{PeriodAmountPatch, Record, RecordData, RecordKind, RecordPatch};

/// Storage-facing interface for records.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Validates and stores a new record. A payload with its active flag set
    /// replaces the current active record of its kind.
    async fn create(&self, data: RecordData) -> Result<Record, GatewayError>;

    /// Applies `patch` to record `id`, validates the result and stores it.
    async fn update(
        &self,
        kind: RecordKind,
        id: RecordId,
        patch: RecordPatch,
    ) -> Result<Record, GatewayError>;

    /// Deletes record `id`.
    async fn remove(&self, kind: RecordKind, id: RecordId) -> Result<(), GatewayError>;

    /// Fetches record `id`.
    async fn find_by_id(
        &self,
        kind: RecordKind,
        id: RecordId,
    ) -> Result<Option<Record>, GatewayError>;

    /// Fetches the active record of `kind`, if any. Always `None` for kinds
    /// without an active flag.
    async fn find_active(&self, kind: RecordKind) -> Result<Option<Record>, GatewayError>;

    /// Fetches every record of `kind`, oldest first.
    async fn find_all(&self, kind: RecordKind) -> Result<Vec<Record>, GatewayError>;

    /// Makes record `id` the active record of `kind`.
    async fn activate(&self, kind: RecordKind, id: RecordId) -> Result<Record, GatewayError> {
        match kind {
            RecordKind::PeriodAmount => {
                self.update(
                    kind,
                    id,
                    RecordPatch::PeriodAmount(PeriodAmountPatch::active(true)),
                )
                .await
            }
            other => Err(GatewayError::NoActiveFlag(other)),
        }
    }
}
