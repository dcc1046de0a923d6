//! Rate lookup service
//!
//! Resolves prices from the tariff tables. Each fetch fails with
//! [`TariffError::NotFound`] when the tables hold no matching row; callers
//! decide whether to fall back or surface "rate unavailable".

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument};

use core_kernel::{Cents, CwtMiles, Miles, Millicents, PortError, Pound};

use crate::error::TariffError;
use crate::lookup::{RateQuery, RateRow};
use crate::ports::TariffPort;
use crate::rates::{
    FullPackQuery, FullUnpackQuery, ItemRateQuery, LinehaulQuery, LinehaulRate, ServiceArea,
    ServiceAreaQuery, ShorthaulQuery, Zip3,
};

/// Read-only access to tariff rates
#[derive(Clone)]
pub struct RateLookup {
    port: Arc<dyn TariffPort>,
}

fn not_found_as<Q: RateQuery>(query: &Q) -> impl FnOnce(PortError) -> TariffError + '_ {
    move |e| match e {
        PortError::NotFound { .. } => TariffError::NotFound {
            table: <Q::Row as RateRow>::TABLE,
            query: query.describe(),
        },
        other => TariffError::Port(other),
    }
}

impl RateLookup {
    pub fn new(port: Arc<dyn TariffPort>) -> Self {
        Self { port }
    }

    /// Continental linehaul price for a distance and weight
    #[instrument(skip(self))]
    pub async fn fetch_base_linehaul_rate(
        &self,
        distance: Miles,
        weight: Pound,
        date: NaiveDate,
    ) -> Result<Cents, TariffError> {
        let rate = self
            .fetch_linehaul_rate(&LinehaulQuery::conus(distance, weight, date))
            .await?;
        Ok(rate.rate_cents)
    }

    pub async fn fetch_linehaul_rate(
        &self,
        query: &LinehaulQuery,
    ) -> Result<LinehaulRate, TariffError> {
        let rate = self
            .port
            .fetch_linehaul_rate(query)
            .await
            .map_err(not_found_as(query))?;
        debug!(rate_id = %rate.id, rate = %rate.rate_cents, "Resolved linehaul rate");
        Ok(rate)
    }

    #[instrument(skip(self))]
    pub async fn fetch_full_pack_rate(
        &self,
        weight: Pound,
        schedule: i32,
        date: NaiveDate,
    ) -> Result<Cents, TariffError> {
        let query = FullPackQuery { schedule, weight, date };
        let rate = self
            .port
            .fetch_full_pack_rate(&query)
            .await
            .map_err(not_found_as(&query))?;
        Ok(rate.rate_cents)
    }

    #[instrument(skip(self))]
    pub async fn fetch_full_unpack_rate(
        &self,
        schedule: i32,
        date: NaiveDate,
    ) -> Result<Millicents, TariffError> {
        let query = FullUnpackQuery { schedule, date };
        let rate = self
            .port
            .fetch_full_unpack_rate(&query)
            .await
            .map_err(not_found_as(&query))?;
        Ok(rate.rate_millicents)
    }

    #[instrument(skip(self))]
    pub async fn fetch_shorthaul_rate(
        &self,
        cwt_miles: CwtMiles,
        date: NaiveDate,
    ) -> Result<Cents, TariffError> {
        let query = ShorthaulQuery { cwt_miles, date };
        let rate = self
            .port
            .fetch_shorthaul_rate(&query)
            .await
            .map_err(not_found_as(&query))?;
        Ok(rate.rate_cents)
    }

    #[instrument(skip(self))]
    pub async fn fetch_service_area(
        &self,
        service_area: i32,
        date: NaiveDate,
    ) -> Result<ServiceArea, TariffError> {
        let query = ServiceAreaQuery { service_area, date };
        self.port
            .fetch_service_area(&query)
            .await
            .map_err(not_found_as(&query))
    }

    /// Resolves the ZIP prefix to its service area, then looks that area up on `date`
    #[instrument(skip(self))]
    pub async fn fetch_service_area_for_zip3(
        &self,
        zip3: &str,
        date: NaiveDate,
    ) -> Result<ServiceArea, TariffError> {
        let record = self.port.fetch_zip3(zip3).await.map_err(|e| match e {
            PortError::NotFound { .. } => TariffError::NotFound {
                table: Zip3::TABLE,
                query: format!("zip3 {}", zip3),
            },
            other => TariffError::Port(other),
        })?;
        self.fetch_service_area(record.service_area, date).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_item_rate(
        &self,
        code: &str,
        schedule: Option<i32>,
        weight: Pound,
        date: NaiveDate,
    ) -> Result<Cents, TariffError> {
        let query = ItemRateQuery {
            code: code.to_string(),
            schedule,
            weight,
            date,
        };
        let rate = self
            .port
            .fetch_item_rate(&query)
            .await
            .map_err(not_found_as(&query))?;
        Ok(rate.rate_cents)
    }
}
