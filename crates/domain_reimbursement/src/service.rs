//! Reimbursement workflow service
//!
//! Loads a reimbursement through the port, applies one lifecycle action,
//! validates the result, and saves it. Nothing is saved when the action is
//! not legal from the stored status or the record fails validation.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::{Cents, Clock, PortError, ReimbursementId, SystemClock, Validatable};

use crate::error::ReimbursementError;
use crate::ports::ReimbursementPort;
use crate::reimbursement::{MethodOfReceipt, Reimbursement, ReimbursementAction};

/// Orchestrates reimbursement lifecycle actions against a port
pub struct ReimbursementService {
    port: Arc<dyn ReimbursementPort>,
    clock: Arc<dyn Clock>,
}

impl ReimbursementService {
    /// Creates a service that stamps transitions with the wall clock
    pub fn new(port: Arc<dyn ReimbursementPort>) -> Self {
        Self {
            port,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for requested dates and update timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Creates and stores a new draft
    #[instrument(skip_all, fields(amount = %requested_amount, method = %method_of_receipt))]
    pub async fn create_draft(
        &self,
        requested_amount: Cents,
        method_of_receipt: MethodOfReceipt,
    ) -> Result<Reimbursement, ReimbursementError> {
        let draft = Reimbursement::build_draft(requested_amount, method_of_receipt);
        draft
            .validate()
            .into_result()
            .map_err(ReimbursementError::ValidationFailed)?;

        self.port.save_reimbursement(&draft).await?;
        info!(reimbursement_id = %draft.id, "Created draft reimbursement");
        Ok(draft)
    }

    pub async fn request(&self, id: ReimbursementId) -> Result<Reimbursement, ReimbursementError> {
        self.transition(id, ReimbursementAction::Request).await
    }

    pub async fn approve(&self, id: ReimbursementId) -> Result<Reimbursement, ReimbursementError> {
        self.transition(id, ReimbursementAction::Approve).await
    }

    pub async fn reject(&self, id: ReimbursementId) -> Result<Reimbursement, ReimbursementError> {
        self.transition(id, ReimbursementAction::Reject).await
    }

    pub async fn pay(&self, id: ReimbursementId) -> Result<Reimbursement, ReimbursementError> {
        self.transition(id, ReimbursementAction::Pay).await
    }

    #[instrument(skip_all, fields(reimbursement_id = %id, action = %action))]
    async fn transition(
        &self,
        id: ReimbursementId,
        action: ReimbursementAction,
    ) -> Result<Reimbursement, ReimbursementError> {
        let mut reimbursement = self
            .port
            .get_reimbursement(id)
            .await
            .map_err(|e| match e {
                PortError::NotFound { .. } => ReimbursementError::NotFound(id.to_string()),
                other => ReimbursementError::Port(other),
            })?;

        let from = reimbursement.status;
        if let Err(e) = reimbursement.perform(action, self.clock.as_ref()) {
            warn!(status = %from, "Rejected reimbursement transition");
            return Err(e);
        }

        reimbursement
            .validate()
            .into_result()
            .map_err(ReimbursementError::ValidationFailed)?;

        self.port.save_reimbursement(&reimbursement).await?;
        info!(from = %from, to = %reimbursement.status, "Reimbursement transitioned");
        Ok(reimbursement)
    }
}
