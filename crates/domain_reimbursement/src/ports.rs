//! Reimbursement Domain Ports
//!
//! The `ReimbursementPort` trait is the only way the workflow service reaches
//! storage. `infra_db` provides the PostgreSQL adapter; the in-memory
//! [`mock::MockReimbursementPort`] backs tests.
//!
//! ```rust,ignore
//! use domain_reimbursement::{ReimbursementPort, ReimbursementService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ReimbursementPort> = Arc::new(PostgresReimbursementAdapter::new(pool));
//! let service = ReimbursementService::new(port);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, ReimbursementId};

use crate::reimbursement::Reimbursement;

/// Storage operations for reimbursements
#[async_trait]
pub trait ReimbursementPort: DomainPort {
    /// Loads a reimbursement by id
    ///
    /// Returns `PortError::NotFound` when no record has this id.
    async fn get_reimbursement(&self, id: ReimbursementId) -> Result<Reimbursement, PortError>;

    /// Inserts the reimbursement or replaces the stored copy with the same id
    async fn save_reimbursement(&self, reimbursement: &Reimbursement) -> Result<(), PortError>;
}

/// Mock implementation of ReimbursementPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{HealthCheckResult, HealthCheckable};

    /// In-memory mock implementation of ReimbursementPort
    #[derive(Debug, Default, Clone)]
    pub struct MockReimbursementPort {
        reimbursements: Arc<RwLock<HashMap<ReimbursementId, Reimbursement>>>,
    }

    impl MockReimbursementPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with reimbursements for testing
        pub async fn with_reimbursements(reimbursements: Vec<Reimbursement>) -> Self {
            let port = Self::new();
            {
                let mut store = port.reimbursements.write().await;
                for reimbursement in reimbursements {
                    store.insert(reimbursement.id, reimbursement);
                }
            }
            port
        }

        pub async fn count(&self) -> usize {
            self.reimbursements.read().await.len()
        }
    }

    impl DomainPort for MockReimbursementPort {}

    #[async_trait]
    impl HealthCheckable for MockReimbursementPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-reimbursement-port", 0)
        }
    }

    #[async_trait]
    impl ReimbursementPort for MockReimbursementPort {
        async fn get_reimbursement(&self, id: ReimbursementId) -> Result<Reimbursement, PortError> {
            self.reimbursements
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Reimbursement", id))
        }

        async fn save_reimbursement(&self, reimbursement: &Reimbursement) -> Result<(), PortError> {
            self.reimbursements
                .write()
                .await
                .insert(reimbursement.id, reimbursement.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockReimbursementPort;
    use super::*;
    use crate::reimbursement::MethodOfReceipt;
    use core_kernel::Cents;

    #[tokio::test]
    async fn test_mock_round_trip() {
        let port = MockReimbursementPort::new();
        let draft = Reimbursement::build_draft(Cents(5000), MethodOfReceipt::Gtcc);

        port.save_reimbursement(&draft).await.unwrap();
        let loaded = port.get_reimbursement(draft.id).await.unwrap();

        assert_eq!(loaded, draft);
        assert_eq!(port.count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_not_found() {
        let port = MockReimbursementPort::new();
        let err = port
            .get_reimbursement(ReimbursementId::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
