//! Tariff Domain
//!
//! Reference rate tables for domestic moves and the lookup that selects a
//! single row from them. Rows are bulk-loaded and read-only afterwards.
//!
//! Every row is bounded by an effective-date window and, depending on the
//! table, by weight, distance or hundredweight-mile bands. All bounds are
//! half-open: `lower <= value < upper`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_tariff::{InMemoryTariffTable, RateLookup};
//! use std::sync::Arc;
//!
//! let table = InMemoryTariffTable::new();
//! table.insert_linehaul_rate(rate).await?;
//!
//! let lookup = RateLookup::new(Arc::new(table));
//! let cents = lookup.fetch_base_linehaul_rate(Miles(500), Pound(2000), date).await?;
//! ```

pub mod lookup;
pub mod rates;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod error;

pub use lookup::{select_rate, RateQuery, RateRow};
pub use rates::{
    FullPackQuery, FullPackRate, FullUnpackQuery, FullUnpackRate, ItemRate, ItemRateQuery,
    LinehaulQuery, LinehaulRate, LinehaulType, ServiceArea, ServiceAreaQuery, ShorthaulQuery,
    ShorthaulRate, Zip3,
};
pub use ports::TariffPort;
pub use adapters::InMemoryTariffTable;
pub use service::RateLookup;
pub use error::TariffError;
