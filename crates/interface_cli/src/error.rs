//! Loader errors

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::ValidationErrors;
use infra_db::DatabaseError;

/// Errors raised while loading a tariff file
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The line could not be parsed into a row
    #[error("{table} line {line}: {source}")]
    Csv {
        table: &'static str,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// The row parsed but broke a bound or a domain rule
    #[error("{table} line {line}: {errors}")]
    InvalidRow {
        table: &'static str,
        line: u64,
        errors: ValidationErrors,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl LoaderError {
    /// Source line the error points at, when it points at one
    pub fn line(&self) -> Option<u64> {
        match self {
            LoaderError::Csv { line, .. } | LoaderError::InvalidRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}
