//! Test Utilities Crate
//!
//! Shared fixtures, builders, assertions, proptest strategies, log capture,
//! and the PostgreSQL container harness used by the workspace test suites.

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
pub use logging::capture_logs;
