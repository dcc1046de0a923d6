//! Tariff domain errors

use thiserror::Error;

use core_kernel::{PortError, RangeError, ValidationErrors};

/// Errors that can occur while loading or looking up tariff rows
#[derive(Debug, Error)]
pub enum TariffError {
    #[error("No {table} row matches {query}")]
    NotFound { table: &'static str, query: String },

    #[error("Invalid range: {0}")]
    InvalidRange(#[from] RangeError),

    #[error("Invalid {table} row: {errors}")]
    ValidationFailed {
        table: &'static str,
        errors: ValidationErrors,
    },

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error(transparent)]
    Port(PortError),
}

impl TariffError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TariffError::NotFound { .. })
    }
}
