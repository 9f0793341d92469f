//! Transactional writer for record kinds with an active flag.
//!
//! Every write to such a kind goes through `ActiveRecordManager::set_active`,
//! which runs in one transaction:
//!
//! 1. Take a transaction-scoped advisory lock keyed on the kind, so
//!    concurrent writers of the same kind queue up instead of racing.
//! 2. If the new payload is active, demote every other active row.
//! 3. Insert or update the target row.
//! 4. Commit.
//!
//! Patches to existing rows take the same lock and re-read the row inside
//! the transaction before applying the patch (see `SeaOrmRecordGateway`), so
//! a patch never writes back a stale `is_active`.
//!
//! Any error drops the transaction, which rolls it back: no partial demotion
//! is ever visible. The partial unique index on `is_active` backs this up at
//! the storage level.

use chrono::Utc;
use indicata_core::gateway::GatewayError;
use indicata_core::records::{KindMismatch, PeriodAmountRecord, Record, RecordData, RecordKind};
use indicata_shared::types::RecordId;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, QueryFilter, Statement, TransactionTrait,
};
use tracing::{debug, error, info};

use super::mapping::{WriteStamp, period_amount_model, storage_error};
use crate::entities::period_amounts;

/// Which row a `set_active` call writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTarget {
    /// Insert a new row with a fresh id.
    New,
    /// Overwrite the row with this id.
    Existing(RecordId),
}

/// Enforces "at most one active record per kind" across concurrent writers.
#[derive(Debug, Clone)]
pub struct ActiveRecordManager {
    db: DatabaseConnection,
}

impl ActiveRecordManager {
    /// Creates a new manager.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes `data` as `target` and, if `data` is active, demotes every
    /// other active record of `kind`, all in one transaction.
    ///
    /// # Errors
    ///
    /// - `NoActiveFlag` if `kind` has no active flag
    /// - `KindMismatch` if `data` is not of `kind`
    /// - `NotFound` if `target` is an id that does not exist
    /// - `Storage` if the transaction fails; `conflict` is set when another
    ///   writer won
    pub async fn set_active(
        &self,
        kind: RecordKind,
        target: ActiveTarget,
        data: RecordData,
    ) -> Result<Record, GatewayError> {
        if !kind.has_active_flag() {
            return Err(GatewayError::NoActiveFlag(kind));
        }
        let payload_kind = data.kind();
        let RecordData::PeriodAmount(period) = data else {
            return Err(KindMismatch {
                patch: payload_kind,
                record: kind,
            }
            .into());
        };

        let result = self.commit_period_amount(kind, target, &period).await;
        if let Err(err @ GatewayError::Storage { .. }) = &result {
            error!(%kind, ?target, error = %err, "Active record write rolled back");
        }
        result
    }

    async fn commit_period_amount(
        &self,
        kind: RecordKind,
        target: ActiveTarget,
        period: &PeriodAmountRecord,
    ) -> Result<Record, GatewayError> {
        let txn = self.db.begin().await.map_err(storage_error)?;
        lock_kind(&txn, kind).await.map_err(storage_error)?;
        let written = write_period_amount(&txn, kind, target, period).await?;
        txn.commit().await.map_err(storage_error)?;

        info!(
            %kind,
            id = %written.id,
            is_active = written.is_active,
            "Active record write committed"
        );
        written.into_record()
    }
}

/// Writes `period` as `target` inside `txn`, demoting every other active row
/// first when `period` is active.
///
/// The caller must already hold `lock_kind` for `kind` in `txn` and is
/// responsible for committing.
pub(crate) async fn write_period_amount(
    txn: &DatabaseTransaction,
    kind: RecordKind,
    target: ActiveTarget,
    period: &PeriodAmountRecord,
) -> Result<period_amounts::Model, GatewayError> {
    let now = Utc::now();
    let (id, stamp) = match target {
        ActiveTarget::New => (RecordId::new(), WriteStamp::insert(now)),
        ActiveTarget::Existing(id) => (id, WriteStamp::update(now)),
    };

    let demoted = if period.is_active {
        period_amounts::Entity::update_many()
            .col_expr(period_amounts::Column::IsActive, Expr::value(false))
            .col_expr(period_amounts::Column::UpdatedAt, Expr::value(now))
            .filter(period_amounts::Column::IsActive.eq(true))
            .filter(period_amounts::Column::Id.ne(id.into_inner()))
            .exec(txn)
            .await
            .map_err(storage_error)?
            .rows_affected
    } else {
        0
    };

    let model = period_amount_model(id, period, stamp);
    let written = match target {
        ActiveTarget::New => model.insert(txn).await,
        ActiveTarget::Existing(_) => model.update(txn).await,
    }
    .map_err(|err| match err {
        DbErr::RecordNotUpdated => GatewayError::NotFound { kind, id },
        other => storage_error(other),
    })?;

    debug!(
        %kind,
        %id,
        is_active = period.is_active,
        demoted,
        "Active record write staged"
    );
    Ok(written)
}

/// Serializes writers of `kind` until the transaction ends.
pub(crate) async fn lock_kind(txn: &DatabaseTransaction, kind: RecordKind) -> Result<(), DbErr> {
    txn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        [kind.as_str().into()],
    ))
    .await?;
    Ok(())
}
