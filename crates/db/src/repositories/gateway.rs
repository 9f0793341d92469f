//! Postgres record gateway.

use async_trait::async_trait;
use chrono::Utc;
use indicata_core::gateway::{GatewayError, RecordGateway, RecordGuard};
use indicata_core::records::{Record, RecordData, RecordKind, RecordPatch};
use indicata_shared::types::RecordId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{debug, error, info};

use super::active::{ActiveRecordManager, ActiveTarget, lock_kind, write_period_amount};
use super::mapping::{WriteStamp, sector_share_model, storage_error, target_model};
use crate::entities::{period_amounts, sector_shares, targets};

/// `RecordGateway` backed by `SeaORM`.
///
/// Every create and update runs `RecordGuard` first. Creates of kinds with an
/// active flag go through `ActiveRecordManager`; other creates are single row
/// inserts. Updates read, check and write the row in one transaction under
/// the kind's advisory lock.
#[derive(Debug, Clone)]
pub struct SeaOrmRecordGateway {
    db: DatabaseConnection,
    active: ActiveRecordManager,
}

impl SeaOrmRecordGateway {
    /// Creates a new gateway.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            active: ActiveRecordManager::new(db.clone()),
            db,
        }
    }

    /// The manager used for active-flag writes.
    #[must_use]
    pub const fn active_records(&self) -> &ActiveRecordManager {
        &self.active
    }

    async fn insert(&self, data: RecordData) -> Result<Record, GatewayError> {
        let id = RecordId::new();
        let stamp = WriteStamp::insert(Utc::now());

        match data {
            RecordData::PeriodAmount(_) => {
                self.active
                    .set_active(RecordKind::PeriodAmount, ActiveTarget::New, data)
                    .await
            }
            RecordData::SectorShare(record) => sector_share_model(id, &record, stamp)?
                .insert(&self.db)
                .await
                .map_err(storage_error)?
                .into_record(),
            RecordData::Target(record) => target_model(id, &record, stamp)?
                .insert(&self.db)
                .await
                .map_err(storage_error)?
                .into_record(),
        }
    }

    /// Applies `patch` to the stored row inside one transaction.
    ///
    /// The row is read after `lock_kind`, so concurrent patches and
    /// activations of the same kind apply one after the other, each to the
    /// state the previous one committed.
    async fn patch(
        &self,
        kind: RecordKind,
        id: RecordId,
        patch: RecordPatch,
    ) -> Result<Record, GatewayError> {
        let txn = self.db.begin().await.map_err(storage_error)?;
        lock_kind(&txn, kind).await.map_err(storage_error)?;

        let current = fetch(&txn, kind, id)
            .await?
            .ok_or(GatewayError::NotFound { kind, id })?;
        let candidate = RecordGuard::check_update(kind, &current, patch)?;

        let stamp = WriteStamp::update(Utc::now());
        let not_found = |err: DbErr| match err {
            DbErr::RecordNotUpdated => GatewayError::NotFound { kind, id },
            other => storage_error(other),
        };

        let written = match candidate {
            RecordData::PeriodAmount(period) => {
                write_period_amount(&txn, kind, ActiveTarget::Existing(id), &period)
                    .await?
                    .into_record()
            }
            RecordData::SectorShare(record) => sector_share_model(id, &record, stamp)?
                .update(&txn)
                .await
                .map_err(not_found)?
                .into_record(),
            RecordData::Target(record) => target_model(id, &record, stamp)?
                .update(&txn)
                .await
                .map_err(not_found)?
                .into_record(),
        }?;

        txn.commit().await.map_err(storage_error)?;
        Ok(written)
    }
}

/// Reads one record of `kind` through `conn`.
async fn fetch<C: ConnectionTrait>(
    conn: &C,
    kind: RecordKind,
    id: RecordId,
) -> Result<Option<Record>, GatewayError> {
    let uuid = id.into_inner();
    match kind {
        RecordKind::SectorShare => sector_shares::Entity::find_by_id(uuid)
            .one(conn)
            .await
            .map_err(storage_error)?
            .map(sector_shares::Model::into_record)
            .transpose(),
        RecordKind::PeriodAmount => period_amounts::Entity::find_by_id(uuid)
            .one(conn)
            .await
            .map_err(storage_error)?
            .map(period_amounts::Model::into_record)
            .transpose(),
        RecordKind::Target => targets::Entity::find_by_id(uuid)
            .one(conn)
            .await
            .map_err(storage_error)?
            .map(targets::Model::into_record)
            .transpose(),
    }
}

/// Logs a failed operation at a level matching its cause.
fn log_failure(operation: &str, kind: RecordKind, err: &GatewayError) {
    match err {
        GatewayError::Storage { .. } => {
            error!(operation, %kind, error = %err, "Record operation failed");
        }
        _ => debug!(operation, %kind, error = %err, "Record operation rejected"),
    }
}

#[async_trait]
impl RecordGateway for SeaOrmRecordGateway {
    async fn create(&self, data: RecordData) -> Result<Record, GatewayError> {
        let kind = data.kind();
        let result = match RecordGuard::check_create(&data) {
            Ok(()) => self.insert(data).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(record) => info!(%kind, id = %record.id, "Record created"),
            Err(err) => log_failure("create", kind, err),
        }
        result
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: RecordId,
        patch: RecordPatch,
    ) -> Result<Record, GatewayError> {
        let result = self.patch(kind, id, patch).await;

        match &result {
            Ok(_) => info!(%kind, %id, "Record updated"),
            Err(err) => log_failure("update", kind, err),
        }
        result
    }

    async fn remove(&self, kind: RecordKind, id: RecordId) -> Result<(), GatewayError> {
        let uuid = id.into_inner();
        let deleted = match kind {
            RecordKind::SectorShare => sector_shares::Entity::delete_by_id(uuid).exec(&self.db).await,
            RecordKind::PeriodAmount => {
                period_amounts::Entity::delete_by_id(uuid).exec(&self.db).await
            }
            RecordKind::Target => targets::Entity::delete_by_id(uuid).exec(&self.db).await,
        }
        .map_err(storage_error);

        let result = match deleted {
            Ok(outcome) if outcome.rows_affected == 0 => Err(GatewayError::NotFound { kind, id }),
            Ok(_) => Ok(()),
            Err(err) => Err(err),
        };

        match &result {
            Ok(()) => info!(%kind, %id, "Record removed"),
            Err(err) => log_failure("remove", kind, err),
        }
        result
    }

    async fn find_by_id(
        &self,
        kind: RecordKind,
        id: RecordId,
    ) -> Result<Option<Record>, GatewayError> {
        fetch(&self.db, kind, id).await
    }

    async fn find_active(&self, kind: RecordKind) -> Result<Option<Record>, GatewayError> {
        match kind {
            RecordKind::PeriodAmount => period_amounts::Entity::find()
                .filter(period_amounts::Column::IsActive.eq(true))
                .one(&self.db)
                .await
                .map_err(storage_error)?
                .map(period_amounts::Model::into_record)
                .transpose(),
            RecordKind::SectorShare | RecordKind::Target => Ok(None),
        }
    }

    async fn find_all(&self, kind: RecordKind) -> Result<Vec<Record>, GatewayError> {
        match kind {
            RecordKind::SectorShare => sector_shares::Entity::find()
                .order_by_asc(sector_shares::Column::CreatedAt)
                .order_by_asc(sector_shares::Column::Id)
                .all(&self.db)
                .await
                .map_err(storage_error)?
                .into_iter()
                .map(sector_shares::Model::into_record)
                .collect(),
            RecordKind::PeriodAmount => period_amounts::Entity::find()
                .order_by_asc(period_amounts::Column::CreatedAt)
                .order_by_asc(period_amounts::Column::Id)
                .all(&self.db)
                .await
                .map_err(storage_error)?
                .into_iter()
                .map(period_amounts::Model::into_record)
                .collect(),
            RecordKind::Target => targets::Entity::find()
                .order_by_asc(targets::Column::CreatedAt)
                .order_by_asc(targets::Column::Id)
                .all(&self.db)
                .await
                .map_err(storage_error)?
                .into_iter()
                .map(targets::Model::into_record)
                .collect(),
        }
    }
}
