//! Tariff Domain Ports
//!
//! `TariffPort` is the read side of the rate tables. Every fetch returns
//! the single row selected by the shared matching rule, or
//! `PortError::NotFound` naming the table and the query.
//!
//! Two adapters implement it: [`crate::adapters::InMemoryTariffTable`]
//! for preloaded reference data, and `PostgresTariffAdapter` in `infra_db`.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::rates::{
    FullPackQuery, FullPackRate, FullUnpackQuery, FullUnpackRate, ItemRate, ItemRateQuery,
    LinehaulQuery, LinehaulRate, ServiceArea, ServiceAreaQuery, ShorthaulQuery, ShorthaulRate,
    Zip3,
};

#[async_trait]
pub trait TariffPort: DomainPort {
    async fn fetch_linehaul_rate(&self, query: &LinehaulQuery) -> Result<LinehaulRate, PortError>;

    async fn fetch_full_pack_rate(&self, query: &FullPackQuery) -> Result<FullPackRate, PortError>;

    async fn fetch_full_unpack_rate(
        &self,
        query: &FullUnpackQuery,
    ) -> Result<FullUnpackRate, PortError>;

    async fn fetch_shorthaul_rate(
        &self,
        query: &ShorthaulQuery,
    ) -> Result<ShorthaulRate, PortError>;

    async fn fetch_service_area(&self, query: &ServiceAreaQuery) -> Result<ServiceArea, PortError>;

    async fn fetch_item_rate(&self, query: &ItemRateQuery) -> Result<ItemRate, PortError>;

    /// Loads the ZIP prefix record; zip3 rows carry no effective window
    async fn fetch_zip3(&self, zip3: &str) -> Result<Zip3, PortError>;
}
