//! Port adapters backed by PostgreSQL
//!
//! Each adapter implements a domain port over a repository and translates
//! between flat rows and domain types. Database failures surface as
//! `PortError` through `From<DatabaseError>`.

use sqlx::PgPool;

use core_kernel::HealthCheckResult;

pub mod reimbursement;
pub mod tariff;

pub use reimbursement::PostgresReimbursementAdapter;
pub use tariff::PostgresTariffAdapter;

/// Runs `SELECT 1` and reports latency
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(
            adapter_id,
            latency_ms,
            format!("Database error: {}", e),
        ),
    }
}
