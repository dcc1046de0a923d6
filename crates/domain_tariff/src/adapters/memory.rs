//! In-memory tariff tables
//!
//! Holds preloaded rate rows behind a `tokio::sync::RwLock` and answers
//! lookups with the same matching rule the database adapter applies.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, Validatable};

use crate::error::TariffError;
use crate::lookup::{select_rate, RateQuery, RateRow};
use crate::ports::TariffPort;
use crate::rates::{
    FullPackQuery, FullPackRate, FullUnpackQuery, FullUnpackRate, ItemRate, ItemRateQuery,
    LinehaulQuery, LinehaulRate, ServiceArea, ServiceAreaQuery, ShorthaulQuery, ShorthaulRate,
    Zip3,
};

#[derive(Debug, Default)]
struct Tables {
    linehaul: Vec<LinehaulRate>,
    full_pack: Vec<FullPackRate>,
    full_unpack: Vec<FullUnpackRate>,
    shorthaul: Vec<ShorthaulRate>,
    service_areas: Vec<ServiceArea>,
    item_rates: Vec<ItemRate>,
    zip3s: HashMap<String, Zip3>,
}

/// Tariff tables held in memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryTariffTable {
    tables: Arc<RwLock<Tables>>,
}

fn check<R: Validatable>(table: &'static str, row: &R) -> Result<(), TariffError> {
    row.validate()
        .into_result()
        .map_err(|errors| TariffError::ValidationFailed { table, errors })
}

fn lookup<Q>(rows: &[Q::Row], query: &Q) -> Result<Q::Row, PortError>
where
    Q: RateQuery,
    Q::Row: Clone,
{
    debug!(table = Q::Row::TABLE, query = %query.describe(), "In-memory rate lookup");
    select_rate(rows, query)
        .cloned()
        .ok_or_else(|| PortError::not_found(Q::Row::TABLE, query.describe()))
}

impl InMemoryTariffTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_linehaul_rate(&self, row: LinehaulRate) -> Result<(), TariffError> {
        check(LinehaulRate::TABLE, &row)?;
        self.tables.write().await.linehaul.push(row);
        Ok(())
    }

    pub async fn insert_full_pack_rate(&self, row: FullPackRate) -> Result<(), TariffError> {
        check(FullPackRate::TABLE, &row)?;
        self.tables.write().await.full_pack.push(row);
        Ok(())
    }

    pub async fn insert_full_unpack_rate(&self, row: FullUnpackRate) -> Result<(), TariffError> {
        check(FullUnpackRate::TABLE, &row)?;
        self.tables.write().await.full_unpack.push(row);
        Ok(())
    }

    pub async fn insert_shorthaul_rate(&self, row: ShorthaulRate) -> Result<(), TariffError> {
        check(ShorthaulRate::TABLE, &row)?;
        self.tables.write().await.shorthaul.push(row);
        Ok(())
    }

    pub async fn insert_service_area(&self, row: ServiceArea) -> Result<(), TariffError> {
        check(ServiceArea::TABLE, &row)?;
        self.tables.write().await.service_areas.push(row);
        Ok(())
    }

    pub async fn insert_item_rate(&self, row: ItemRate) -> Result<(), TariffError> {
        check(ItemRate::TABLE, &row)?;
        self.tables.write().await.item_rates.push(row);
        Ok(())
    }

    /// Inserts or replaces the record for the row's prefix
    pub async fn insert_zip3(&self, row: Zip3) -> Result<(), TariffError> {
        check(Zip3::TABLE, &row)?;
        self.tables.write().await.zip3s.insert(row.zip3.clone(), row);
        Ok(())
    }
}

impl DomainPort for InMemoryTariffTable {}

#[async_trait]
impl HealthCheckable for InMemoryTariffTable {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("in-memory-tariff-table", 0)
    }
}

#[async_trait]
impl TariffPort for InMemoryTariffTable {
    async fn fetch_linehaul_rate(&self, query: &LinehaulQuery) -> Result<LinehaulRate, PortError> {
        lookup(&self.tables.read().await.linehaul, query)
    }

    async fn fetch_full_pack_rate(&self, query: &FullPackQuery) -> Result<FullPackRate, PortError> {
        lookup(&self.tables.read().await.full_pack, query)
    }

    async fn fetch_full_unpack_rate(
        &self,
        query: &FullUnpackQuery,
    ) -> Result<FullUnpackRate, PortError> {
        lookup(&self.tables.read().await.full_unpack, query)
    }

    async fn fetch_shorthaul_rate(
        &self,
        query: &ShorthaulQuery,
    ) -> Result<ShorthaulRate, PortError> {
        lookup(&self.tables.read().await.shorthaul, query)
    }

    async fn fetch_service_area(&self, query: &ServiceAreaQuery) -> Result<ServiceArea, PortError> {
        lookup(&self.tables.read().await.service_areas, query)
    }

    async fn fetch_item_rate(&self, query: &ItemRateQuery) -> Result<ItemRate, PortError> {
        lookup(&self.tables.read().await.item_rates, query)
    }

    async fn fetch_zip3(&self, zip3: &str) -> Result<Zip3, PortError> {
        self.tables
            .read()
            .await
            .zip3s
            .get(zip3)
            .cloned()
            .ok_or_else(|| PortError::not_found(Zip3::TABLE, zip3))
    }
}
