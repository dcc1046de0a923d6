//! Reimbursement repository
//!
//! Stores one row per reimbursement; saving an existing id replaces the row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for reimbursement rows
#[derive(Debug, Clone)]
pub struct ReimbursementRepository {
    pool: PgPool,
}

impl ReimbursementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a reimbursement by id, or `NotFound`
    pub async fn get_by_id(&self, id: Uuid) -> Result<ReimbursementRow, DatabaseError> {
        sqlx::query_as::<_, ReimbursementRow>(
            r#"
            SELECT
                id,
                requested_amount,
                method_of_receipt,
                status,
                requested_date,
                created_at,
                updated_at
            FROM reimbursements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Reimbursement", id))
    }

    /// Inserts the row, or overwrites every column of the row with the same id
    pub async fn upsert(&self, row: &ReimbursementRow) -> Result<(), DatabaseError> {
        debug!(id = %row.id, status = ?row.status, "Upserting reimbursement");

        sqlx::query(
            r#"
            INSERT INTO reimbursements (
                id, requested_amount, method_of_receipt, status,
                requested_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                requested_amount = EXCLUDED.requested_amount,
                method_of_receipt = EXCLUDED.method_of_receipt,
                status = EXCLUDED.status,
                requested_date = EXCLUDED.requested_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(row.requested_amount)
        .bind(row.method_of_receipt)
        .bind(row.status)
        .bind(row.requested_date)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists reimbursements in one status, oldest first
    pub async fn find_by_status(
        &self,
        status: ReimbursementStatus,
    ) -> Result<Vec<ReimbursementRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReimbursementRow>(
            r#"
            SELECT
                id,
                requested_amount,
                method_of_receipt,
                status,
                requested_date,
                created_at,
                updated_at
            FROM reimbursements
            WHERE status = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Reimbursement status column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reimbursement_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReimbursementStatus {
    Draft,
    Requested,
    Approved,
    Paid,
    Rejected,
}

/// Method of receipt column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "method_of_receipt", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodOfReceipt {
    MilPay,
    OtherDd,
    Gtcc,
}

/// Database row for a reimbursement
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ReimbursementRow {
    pub id: Uuid,
    pub requested_amount: i64,
    pub method_of_receipt: MethodOfReceipt,
    pub status: ReimbursementStatus,
    pub requested_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
