//! PostgreSQL tariff adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_tariff::{
    FullPackQuery, FullPackRate, FullUnpackQuery, FullUnpackRate, ItemRate, ItemRateQuery,
    LinehaulQuery, LinehaulRate, RateQuery, RateRow, ServiceArea, ServiceAreaQuery,
    ShorthaulQuery, ShorthaulRate, TariffPort, Zip3,
};

use crate::repositories::tariff::{TariffRecord, TariffRepository};

/// PostgreSQL-backed implementation of `TariffPort`
#[derive(Debug, Clone)]
pub struct PostgresTariffAdapter {
    repository: TariffRepository,
    pool: PgPool,
}

impl PostgresTariffAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TariffRepository::new(pool.clone()),
            pool,
        }
    }

    /// Underlying repository, used by the loader for bulk inserts
    pub fn repository(&self) -> &TariffRepository {
        &self.repository
    }
}

/// Converts a lookup result, mapping a missing row to `PortError::NotFound`
fn found<R, Q>(row: Option<R>, query: &Q) -> Result<Q::Row, PortError>
where
    R: TariffRecord<Domain = Q::Row>,
    Q: RateQuery,
{
    match row {
        Some(row) => row.into_domain().map_err(PortError::from),
        None => Err(PortError::not_found(Q::Row::TABLE, query.describe())),
    }
}

impl DomainPort for PostgresTariffAdapter {}

#[async_trait]
impl HealthCheckable for PostgresTariffAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-tariff-adapter").await
    }
}

#[async_trait]
impl TariffPort for PostgresTariffAdapter {
    #[instrument(skip_all, fields(query = %query.describe()))]
    async fn fetch_linehaul_rate(&self, query: &LinehaulQuery) -> Result<LinehaulRate, PortError> {
        debug!("Fetching linehaul rate");
        found(self.repository.fetch_linehaul_rate(query).await?, query)
    }

    #[instrument(skip_all, fields(query = %query.describe()))]
    async fn fetch_full_pack_rate(&self, query: &FullPackQuery) -> Result<FullPackRate, PortError> {
        debug!("Fetching full pack rate");
        found(self.repository.fetch_full_pack_rate(query).await?, query)
    }

    #[instrument(skip_all, fields(query = %query.describe()))]
    async fn fetch_full_unpack_rate(
        &self,
        query: &FullUnpackQuery,
    ) -> Result<FullUnpackRate, PortError> {
        debug!("Fetching full unpack rate");
        found(self.repository.fetch_full_unpack_rate(query).await?, query)
    }

    #[instrument(skip_all, fields(query = %query.describe()))]
    async fn fetch_shorthaul_rate(
        &self,
        query: &ShorthaulQuery,
    ) -> Result<ShorthaulRate, PortError> {
        debug!("Fetching shorthaul rate");
        found(self.repository.fetch_shorthaul_rate(query).await?, query)
    }

    #[instrument(skip_all, fields(query = %query.describe()))]
    async fn fetch_service_area(&self, query: &ServiceAreaQuery) -> Result<ServiceArea, PortError> {
        debug!("Fetching service area");
        found(self.repository.fetch_service_area(query).await?, query)
    }

    #[instrument(skip_all, fields(query = %query.describe()))]
    async fn fetch_item_rate(&self, query: &ItemRateQuery) -> Result<ItemRate, PortError> {
        debug!("Fetching item rate");
        found(self.repository.fetch_item_rate(query).await?, query)
    }

    #[instrument(skip(self))]
    async fn fetch_zip3(&self, zip3: &str) -> Result<Zip3, PortError> {
        debug!("Fetching zip3");
        match self.repository.fetch_zip3(zip3).await? {
            Some(row) => row.into_domain().map_err(PortError::from),
            None => Err(PortError::not_found(Zip3::TABLE, zip3)),
        }
    }
}
