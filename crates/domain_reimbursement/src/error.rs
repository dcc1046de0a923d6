//! Reimbursement domain errors

use thiserror::Error;

use core_kernel::{PortError, ValidationErrors};
use crate::reimbursement::{ReimbursementAction, ReimbursementStatus};

/// Errors that can occur in the reimbursement domain
#[derive(Debug, Error)]
pub enum ReimbursementError {
    #[error("Cannot {action} a reimbursement in status {from}")]
    InvalidTransition {
        from: ReimbursementStatus,
        action: ReimbursementAction,
    },

    #[error("Reimbursement not found: {0}")]
    NotFound(String),

    #[error("Reimbursement is invalid: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ReimbursementError {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, ReimbursementError::InvalidTransition { .. })
    }
}
