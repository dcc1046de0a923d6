//! Database layer for the relocation data model
//!
//! PostgreSQL access through SQLx: a connection pool, repositories that
//! speak flat rows, and adapters that implement the domain ports.
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresTariffAdapter};
//! use domain_tariff::RateLookup;
//! use std::sync::Arc;
//!
//! let pool = create_pool(DatabaseConfig::from_env()?).await?;
//! let lookup = RateLookup::new(Arc::new(PostgresTariffAdapter::new(pool)));
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use repositories::{ReimbursementRepository, TariffRecord, TariffRepository};
pub use adapters::{PostgresReimbursementAdapter, PostgresTariffAdapter};
