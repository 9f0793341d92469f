//! In-memory record gateway.
//!
//! Holds every kind behind one async mutex. A write that activates a record
//! demotes the previous active record and stores the new one while the lock
//! is held, so concurrent callers observe the single-active rule the same
//! way they do against the database implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indicata_shared::types::RecordId;
use tokio::sync::Mutex;

use super::error::GatewayError;
use super::guard::RecordGuard;
use super::RecordGateway;
use crate::records::{Record, RecordData, RecordKind, RecordPatch};

/// Record gateway backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    records: Mutex<BTreeMap<RecordKind, Vec<Record>>>,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Clears the active flag on every record except `keep`.
fn demote_others(records: &mut [Record], keep: RecordId, now: DateTime<Utc>) -> usize {
    let mut demoted = 0;
    for record in records.iter_mut().filter(|r| r.id != keep) {
        if let RecordData::PeriodAmount(period) = &mut record.data
            && period.is_active
        {
            period.is_active = false;
            record.updated_at = now;
            demoted += 1;
        }
    }
    demoted
}

#[async_trait]
impl RecordGateway for InMemoryGateway {
    async fn create(&self, data: RecordData) -> Result<Record, GatewayError> {
        RecordGuard::check_create(&data)?;

        let mut store = self.records.lock().await;
        let records = store.entry(data.kind()).or_default();
        let now = Utc::now();
        let record = Record {
            id: RecordId::new(),
            data,
            created_at: now,
            updated_at: now,
        };

        if record.data.is_active() == Some(true) {
            demote_others(records, record.id, now);
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: RecordId,
        patch: RecordPatch,
    ) -> Result<Record, GatewayError> {
        let mut store = self.records.lock().await;
        let records = store.entry(kind).or_default();
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(GatewayError::NotFound { kind, id })?;

        let candidate = RecordGuard::check_update(kind, &records[index], patch)?;
        let now = Utc::now();
        if candidate.is_active() == Some(true) {
            demote_others(records, id, now);
        }

        let record = &mut records[index];
        record.data = candidate;
        record.updated_at = now;
        Ok(record.clone())
    }

    async fn remove(&self, kind: RecordKind, id: RecordId) -> Result<(), GatewayError> {
        let mut store = self.records.lock().await;
        let records = store.entry(kind).or_default();
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(GatewayError::NotFound { kind, id })?;
        records.remove(index);
        Ok(())
    }

    async fn find_by_id(
        &self,
        kind: RecordKind,
        id: RecordId,
    ) -> Result<Option<Record>, GatewayError> {
        let store = self.records.lock().await;
        Ok(store
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned())
    }

    async fn find_active(&self, kind: RecordKind) -> Result<Option<Record>, GatewayError> {
        if !kind.has_active_flag() {
            return Ok(None);
        }
        let store = self.records.lock().await;
        Ok(store
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.is_active()))
            .cloned())
    }

    async fn find_all(&self, kind: RecordKind) -> Result<Vec<Record>, GatewayError> {
        let store = self.records.lock().await;
        Ok(store.get(&kind).cloned().unwrap_or_default())
    }
}
