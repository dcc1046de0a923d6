//! Command-line surface for the relocation data model
//!
//! The `tariff-loader` binary bulk-loads tariff 400NG rate tables from CSV
//! and resolves rates against the database. This library holds the pieces
//! the binary wires together so they can be tested without a terminal.

pub mod config;
pub mod error;
pub mod loader;
pub mod telemetry;

pub use config::LoaderConfig;
pub use error::LoaderError;
pub use loader::{load_table, read_records, TariffTable};
