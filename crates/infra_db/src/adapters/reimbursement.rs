//! PostgreSQL reimbursement adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    Cents, DomainPort, HealthCheckResult, HealthCheckable, PortError, ReimbursementId,
};
use domain_reimbursement::{
    MethodOfReceipt, Reimbursement, ReimbursementPort, ReimbursementStatus,
};

use crate::repositories::reimbursement::{
    MethodOfReceipt as DbMethodOfReceipt, ReimbursementRepository, ReimbursementRow,
    ReimbursementStatus as DbReimbursementStatus,
};

/// PostgreSQL-backed implementation of `ReimbursementPort`
#[derive(Debug, Clone)]
pub struct PostgresReimbursementAdapter {
    repository: ReimbursementRepository,
    pool: PgPool,
}

impl PostgresReimbursementAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReimbursementRepository::new(pool.clone()),
            pool,
        }
    }

    /// Underlying repository, for queries the port does not expose
    pub fn repository(&self) -> &ReimbursementRepository {
        &self.repository
    }
}

impl DomainPort for PostgresReimbursementAdapter {}

#[async_trait]
impl HealthCheckable for PostgresReimbursementAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-reimbursement-adapter").await
    }
}

#[async_trait]
impl ReimbursementPort for PostgresReimbursementAdapter {
    #[instrument(skip(self), fields(reimbursement_id = %id))]
    async fn get_reimbursement(&self, id: ReimbursementId) -> Result<Reimbursement, PortError> {
        debug!("Loading reimbursement");
        let row = self.repository.get_by_id(*id.as_uuid()).await?;
        Ok(row_to_reimbursement(row))
    }

    #[instrument(skip_all, fields(reimbursement_id = %reimbursement.id))]
    async fn save_reimbursement(&self, reimbursement: &Reimbursement) -> Result<(), PortError> {
        debug!(status = %reimbursement.status, "Saving reimbursement");
        self.repository
            .upsert(&reimbursement_to_row(reimbursement))
            .await
            .map_err(PortError::from)
    }
}

// ============================================================================
// Conversion helpers
// ============================================================================

impl From<ReimbursementStatus> for DbReimbursementStatus {
    fn from(status: ReimbursementStatus) -> Self {
        match status {
            ReimbursementStatus::Draft => DbReimbursementStatus::Draft,
            ReimbursementStatus::Requested => DbReimbursementStatus::Requested,
            ReimbursementStatus::Approved => DbReimbursementStatus::Approved,
            ReimbursementStatus::Paid => DbReimbursementStatus::Paid,
            ReimbursementStatus::Rejected => DbReimbursementStatus::Rejected,
        }
    }
}

impl From<DbReimbursementStatus> for ReimbursementStatus {
    fn from(status: DbReimbursementStatus) -> Self {
        match status {
            DbReimbursementStatus::Draft => ReimbursementStatus::Draft,
            DbReimbursementStatus::Requested => ReimbursementStatus::Requested,
            DbReimbursementStatus::Approved => ReimbursementStatus::Approved,
            DbReimbursementStatus::Paid => ReimbursementStatus::Paid,
            DbReimbursementStatus::Rejected => ReimbursementStatus::Rejected,
        }
    }
}

impl From<MethodOfReceipt> for DbMethodOfReceipt {
    fn from(method: MethodOfReceipt) -> Self {
        match method {
            MethodOfReceipt::MilPay => DbMethodOfReceipt::MilPay,
            MethodOfReceipt::OtherDd => DbMethodOfReceipt::OtherDd,
            MethodOfReceipt::Gtcc => DbMethodOfReceipt::Gtcc,
        }
    }
}

impl From<DbMethodOfReceipt> for MethodOfReceipt {
    fn from(method: DbMethodOfReceipt) -> Self {
        match method {
            DbMethodOfReceipt::MilPay => MethodOfReceipt::MilPay,
            DbMethodOfReceipt::OtherDd => MethodOfReceipt::OtherDd,
            DbMethodOfReceipt::Gtcc => MethodOfReceipt::Gtcc,
        }
    }
}

fn row_to_reimbursement(row: ReimbursementRow) -> Reimbursement {
    Reimbursement {
        id: ReimbursementId::from_uuid(row.id),
        requested_amount: Cents(row.requested_amount),
        method_of_receipt: row.method_of_receipt.into(),
        status: row.status.into(),
        requested_date: row.requested_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn reimbursement_to_row(reimbursement: &Reimbursement) -> ReimbursementRow {
    ReimbursementRow {
        id: *reimbursement.id.as_uuid(),
        requested_amount: reimbursement.requested_amount.value(),
        method_of_receipt: reimbursement.method_of_receipt.into(),
        status: reimbursement.status.into(),
        requested_date: reimbursement.requested_date,
        created_at: reimbursement.created_at,
        updated_at: reimbursement.updated_at,
    }
}
