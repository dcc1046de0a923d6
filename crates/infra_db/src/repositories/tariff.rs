//! Tariff 400NG repository
//!
//! Rows are stored flat, one column per range bound. Every lookup applies the
//! same `[lower, upper)` predicate as the in-memory table and orders matches
//! by `effective_date_lower DESC, id ASC`, taking the first.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use core_kernel::{
    Cents, Constraint, CwtMiles, FieldBound, FieldRule, FieldValue, HalfOpenRange, Miles,
    Millicents, Pound, RateId, Validatable, ValidationErrors, Zip3Id,
};
use domain_tariff::{
    FullPackQuery, FullPackRate, FullUnpackQuery, FullUnpackRate, ItemRate, ItemRateQuery,
    LinehaulQuery, LinehaulRate, LinehaulType, RateQuery, RateRow, ServiceArea,
    ServiceAreaQuery, ShorthaulQuery, ShorthaulRate, Zip3,
};

use crate::error::DatabaseError;

/// A flat tariff row as loaded from CSV or read from PostgreSQL
pub trait TariffRecord: Validatable + DeserializeOwned + Clone {
    type Domain: Validatable;

    const TABLE: &'static str;

    /// Builds the typed domain row
    fn into_domain(self) -> Result<Self::Domain, DatabaseError>;

    /// Checks column bounds, then the domain rules of the typed row
    fn check(&self) -> ValidationErrors {
        let mut errors = self.validate();
        if errors.is_empty() {
            match self.clone().into_domain() {
                Ok(domain) => errors.merge(domain.validate()),
                Err(e) => errors.add("Row", e.to_string()),
            }
        }
        errors
    }
}

fn band<T>(table: &'static str, lower: T, upper: T) -> Result<HalfOpenRange<T>, DatabaseError>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    HalfOpenRange::new(lower, upper).map_err(|e| DatabaseError::invalid_row(table, e))
}

fn date_rules(lower: NaiveDate, upper: NaiveDate) -> FieldRule<'static> {
    FieldRule::new("EffectiveDateLower", FieldValue::Date(lower)).with(Constraint::LessThan {
        other_field: "EffectiveDateUpper",
        other: FieldBound::Date(upper),
    })
}

fn int_band_rule(field: &'static str, other_field: &'static str, lower: i64, upper: i64) -> FieldRule<'static> {
    FieldRule::new(field, FieldValue::Int(lower)).with(Constraint::LessThan {
        other_field,
        other: FieldBound::Int(upper),
    })
}

/// Keeps the first of the ordered matches, warning when the table overlaps
fn first_match<R>(table: &'static str, query: &str, rows: Vec<R>) -> Option<R> {
    if rows.len() > 1 {
        warn!(
            table,
            query,
            "Multiple rate rows match; using latest effective window"
        );
    }
    rows.into_iter().next()
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LinehaulRateRow {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub distance_miles_lower: i32,
    pub distance_miles_upper: i32,
    pub weight_lbs_lower: i64,
    pub weight_lbs_upper: i64,
    pub rate_cents: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub linehaul_type: String,
    pub effective_date_lower: NaiveDate,
    pub effective_date_upper: NaiveDate,
}

impl Validatable for LinehaulRateRow {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            int_band_rule(
                "DistanceMilesLower",
                "DistanceMilesUpper",
                self.distance_miles_lower.into(),
                self.distance_miles_upper.into(),
            ),
            int_band_rule("WeightLbsLower", "WeightLbsUpper", self.weight_lbs_lower, self.weight_lbs_upper),
            FieldRule::new("Type", FieldValue::Text(&self.linehaul_type))
                .with(Constraint::OneOf(LinehaulType::NAMES)),
            date_rules(self.effective_date_lower, self.effective_date_upper),
        ]
    }
}

impl TariffRecord for LinehaulRateRow {
    type Domain = LinehaulRate;
    const TABLE: &'static str = LinehaulRate::TABLE;

    fn into_domain(self) -> Result<LinehaulRate, DatabaseError> {
        Ok(LinehaulRate {
            id: RateId::from_uuid(self.id),
            distance_miles: band(
                Self::TABLE,
                Miles(self.distance_miles_lower),
                Miles(self.distance_miles_upper),
            )?,
            weight_lbs: band(Self::TABLE, Pound(self.weight_lbs_lower), Pound(self.weight_lbs_upper))?,
            rate_cents: Cents(self.rate_cents),
            linehaul_type: self
                .linehaul_type
                .parse()
                .map_err(|e| DatabaseError::invalid_row(Self::TABLE, e))?,
            effective_dates: band(Self::TABLE, self.effective_date_lower, self.effective_date_upper)?,
        })
    }
}

impl From<&LinehaulRate> for LinehaulRateRow {
    fn from(rate: &LinehaulRate) -> Self {
        Self {
            id: *rate.id.as_uuid(),
            distance_miles_lower: rate.distance_miles.lower().value(),
            distance_miles_upper: rate.distance_miles.upper().value(),
            weight_lbs_lower: rate.weight_lbs.lower().value(),
            weight_lbs_upper: rate.weight_lbs.upper().value(),
            rate_cents: rate.rate_cents.value(),
            linehaul_type: rate.linehaul_type.to_string(),
            effective_date_lower: rate.effective_dates.lower(),
            effective_date_upper: rate.effective_dates.upper(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FullPackRateRow {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub schedule: i32,
    pub weight_lbs_lower: i64,
    pub weight_lbs_upper: i64,
    pub rate_cents: i64,
    pub effective_date_lower: NaiveDate,
    pub effective_date_upper: NaiveDate,
}

impl Validatable for FullPackRateRow {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            int_band_rule("WeightLbsLower", "WeightLbsUpper", self.weight_lbs_lower, self.weight_lbs_upper),
            date_rules(self.effective_date_lower, self.effective_date_upper),
        ]
    }
}

impl TariffRecord for FullPackRateRow {
    type Domain = FullPackRate;
    const TABLE: &'static str = FullPackRate::TABLE;

    fn into_domain(self) -> Result<FullPackRate, DatabaseError> {
        Ok(FullPackRate {
            id: RateId::from_uuid(self.id),
            schedule: self.schedule,
            weight_lbs: band(Self::TABLE, Pound(self.weight_lbs_lower), Pound(self.weight_lbs_upper))?,
            rate_cents: Cents(self.rate_cents),
            effective_dates: band(Self::TABLE, self.effective_date_lower, self.effective_date_upper)?,
        })
    }
}

impl From<&FullPackRate> for FullPackRateRow {
    fn from(rate: &FullPackRate) -> Self {
        Self {
            id: *rate.id.as_uuid(),
            schedule: rate.schedule,
            weight_lbs_lower: rate.weight_lbs.lower().value(),
            weight_lbs_upper: rate.weight_lbs.upper().value(),
            rate_cents: rate.rate_cents.value(),
            effective_date_lower: rate.effective_dates.lower(),
            effective_date_upper: rate.effective_dates.upper(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FullUnpackRateRow {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub schedule: i32,
    pub rate_millicents: i64,
    pub effective_date_lower: NaiveDate,
    pub effective_date_upper: NaiveDate,
}

impl Validatable for FullUnpackRateRow {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![date_rules(self.effective_date_lower, self.effective_date_upper)]
    }
}

impl TariffRecord for FullUnpackRateRow {
    type Domain = FullUnpackRate;
    const TABLE: &'static str = FullUnpackRate::TABLE;

    fn into_domain(self) -> Result<FullUnpackRate, DatabaseError> {
        Ok(FullUnpackRate {
            id: RateId::from_uuid(self.id),
            schedule: self.schedule,
            rate_millicents: Millicents(self.rate_millicents),
            effective_dates: band(Self::TABLE, self.effective_date_lower, self.effective_date_upper)?,
        })
    }
}

impl From<&FullUnpackRate> for FullUnpackRateRow {
    fn from(rate: &FullUnpackRate) -> Self {
        Self {
            id: *rate.id.as_uuid(),
            schedule: rate.schedule,
            rate_millicents: rate.rate_millicents.value(),
            effective_date_lower: rate.effective_dates.lower(),
            effective_date_upper: rate.effective_dates.upper(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShorthaulRateRow {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub cwt_miles_lower: i64,
    pub cwt_miles_upper: i64,
    pub rate_cents: i64,
    pub effective_date_lower: NaiveDate,
    pub effective_date_upper: NaiveDate,
}

impl Validatable for ShorthaulRateRow {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            int_band_rule("CwtMilesLower", "CwtMilesUpper", self.cwt_miles_lower, self.cwt_miles_upper),
            date_rules(self.effective_date_lower, self.effective_date_upper),
        ]
    }
}

impl TariffRecord for ShorthaulRateRow {
    type Domain = ShorthaulRate;
    const TABLE: &'static str = ShorthaulRate::TABLE;

    fn into_domain(self) -> Result<ShorthaulRate, DatabaseError> {
        Ok(ShorthaulRate {
            id: RateId::from_uuid(self.id),
            cwt_miles: band(
                Self::TABLE,
                CwtMiles(self.cwt_miles_lower),
                CwtMiles(self.cwt_miles_upper),
            )?,
            rate_cents: Cents(self.rate_cents),
            effective_dates: band(Self::TABLE, self.effective_date_lower, self.effective_date_upper)?,
        })
    }
}

impl From<&ShorthaulRate> for ShorthaulRateRow {
    fn from(rate: &ShorthaulRate) -> Self {
        Self {
            id: *rate.id.as_uuid(),
            cwt_miles_lower: rate.cwt_miles.lower().value(),
            cwt_miles_upper: rate.cwt_miles.upper().value(),
            rate_cents: rate.rate_cents.value(),
            effective_date_lower: rate.effective_dates.lower(),
            effective_date_upper: rate.effective_dates.upper(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceAreaRow {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub name: String,
    pub service_area: i32,
    pub services_schedule: i32,
    pub linehaul_factor: i64,
    pub service_charge_cents: i64,
    pub sit_185a_rate_cents: i64,
    pub sit_185b_rate_cents: i64,
    pub sit_pd_schedule: i32,
    pub effective_date_lower: NaiveDate,
    pub effective_date_upper: NaiveDate,
}

impl Validatable for ServiceAreaRow {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![date_rules(self.effective_date_lower, self.effective_date_upper)]
    }
}

impl TariffRecord for ServiceAreaRow {
    type Domain = ServiceArea;
    const TABLE: &'static str = ServiceArea::TABLE;

    fn into_domain(self) -> Result<ServiceArea, DatabaseError> {
        Ok(ServiceArea {
            id: RateId::from_uuid(self.id),
            name: self.name,
            service_area: self.service_area,
            services_schedule: self.services_schedule,
            linehaul_factor: Cents(self.linehaul_factor),
            service_charge_cents: Cents(self.service_charge_cents),
            sit_185a_rate_cents: Cents(self.sit_185a_rate_cents),
            sit_185b_rate_cents: Cents(self.sit_185b_rate_cents),
            sit_pd_schedule: self.sit_pd_schedule,
            effective_dates: band(Self::TABLE, self.effective_date_lower, self.effective_date_upper)?,
        })
    }
}

impl From<&ServiceArea> for ServiceAreaRow {
    fn from(area: &ServiceArea) -> Self {
        Self {
            id: *area.id.as_uuid(),
            name: area.name.clone(),
            service_area: area.service_area,
            services_schedule: area.services_schedule,
            linehaul_factor: area.linehaul_factor.value(),
            service_charge_cents: area.service_charge_cents.value(),
            sit_185a_rate_cents: area.sit_185a_rate_cents.value(),
            sit_185b_rate_cents: area.sit_185b_rate_cents.value(),
            sit_pd_schedule: area.sit_pd_schedule,
            effective_date_lower: area.effective_dates.lower(),
            effective_date_upper: area.effective_dates.upper(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemRateRow {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub code: String,
    pub schedule: Option<i32>,
    pub weight_lbs_lower: i64,
    pub weight_lbs_upper: i64,
    pub rate_cents: i64,
    pub effective_date_lower: NaiveDate,
    pub effective_date_upper: NaiveDate,
}

impl Validatable for ItemRateRow {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            int_band_rule("WeightLbsLower", "WeightLbsUpper", self.weight_lbs_lower, self.weight_lbs_upper),
            date_rules(self.effective_date_lower, self.effective_date_upper),
        ]
    }
}

impl TariffRecord for ItemRateRow {
    type Domain = ItemRate;
    const TABLE: &'static str = ItemRate::TABLE;

    fn into_domain(self) -> Result<ItemRate, DatabaseError> {
        Ok(ItemRate {
            id: RateId::from_uuid(self.id),
            code: self.code,
            schedule: self.schedule,
            weight_lbs: band(Self::TABLE, Pound(self.weight_lbs_lower), Pound(self.weight_lbs_upper))?,
            rate_cents: Cents(self.rate_cents),
            effective_dates: band(Self::TABLE, self.effective_date_lower, self.effective_date_upper)?,
        })
    }
}

impl From<&ItemRate> for ItemRateRow {
    fn from(rate: &ItemRate) -> Self {
        Self {
            id: *rate.id.as_uuid(),
            code: rate.code.clone(),
            schedule: rate.schedule,
            weight_lbs_lower: rate.weight_lbs.lower().value(),
            weight_lbs_upper: rate.weight_lbs.upper().value(),
            rate_cents: rate.rate_cents.value(),
            effective_date_lower: rate.effective_dates.lower(),
            effective_date_upper: rate.effective_dates.upper(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Zip3Row {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub zip3: String,
    pub basepoint_city: String,
    pub state: String,
    pub service_area: i32,
    pub rate_area: String,
    pub region: i32,
}

impl Validatable for Zip3Row {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![FieldRule::new("BasepointCity", FieldValue::Text(&self.basepoint_city))
            .with(Constraint::NotBlank)]
    }
}

impl TariffRecord for Zip3Row {
    type Domain = Zip3;
    const TABLE: &'static str = Zip3::TABLE;

    fn into_domain(self) -> Result<Zip3, DatabaseError> {
        Ok(Zip3 {
            id: Zip3Id::from_uuid(self.id),
            zip3: self.zip3,
            basepoint_city: self.basepoint_city,
            state: self.state,
            service_area: self.service_area,
            rate_area: self.rate_area,
            region: self.region,
        })
    }
}

impl From<&Zip3> for Zip3Row {
    fn from(zip3: &Zip3) -> Self {
        Self {
            id: *zip3.id.as_uuid(),
            zip3: zip3.zip3.clone(),
            basepoint_city: zip3.basepoint_city.clone(),
            state: zip3.state.clone(),
            service_area: zip3.service_area,
            rate_area: zip3.rate_area.clone(),
            region: zip3.region,
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Repository for the tariff 400NG reference tables
#[derive(Debug, Clone)]
pub struct TariffRepository {
    pool: PgPool,
}

impl TariffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn fetch_linehaul_rate(
        &self,
        query: &LinehaulQuery,
    ) -> Result<Option<LinehaulRateRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, LinehaulRateRow>(
            r#"
            SELECT
                id, distance_miles_lower, distance_miles_upper,
                weight_lbs_lower, weight_lbs_upper, rate_cents, type,
                effective_date_lower, effective_date_upper
            FROM tariff400ng_linehaul_rates
            WHERE type = $1
              AND distance_miles_lower <= $2 AND $2 < distance_miles_upper
              AND weight_lbs_lower <= $3 AND $3 < weight_lbs_upper
              AND effective_date_lower <= $4 AND $4 < effective_date_upper
            ORDER BY effective_date_lower DESC, id ASC
            LIMIT 2
            "#,
        )
        .bind(query.linehaul_type.as_str())
        .bind(query.distance.value())
        .bind(query.weight.value())
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(first_match(LinehaulRate::TABLE, &query.describe(), rows))
    }

    pub async fn fetch_full_pack_rate(
        &self,
        query: &FullPackQuery,
    ) -> Result<Option<FullPackRateRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, FullPackRateRow>(
            r#"
            SELECT
                id, schedule, weight_lbs_lower, weight_lbs_upper, rate_cents,
                effective_date_lower, effective_date_upper
            FROM tariff400ng_full_pack_rates
            WHERE schedule = $1
              AND weight_lbs_lower <= $2 AND $2 < weight_lbs_upper
              AND effective_date_lower <= $3 AND $3 < effective_date_upper
            ORDER BY effective_date_lower DESC, id ASC
            LIMIT 2
            "#,
        )
        .bind(query.schedule)
        .bind(query.weight.value())
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(first_match(FullPackRate::TABLE, &query.describe(), rows))
    }

    pub async fn fetch_full_unpack_rate(
        &self,
        query: &FullUnpackQuery,
    ) -> Result<Option<FullUnpackRateRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, FullUnpackRateRow>(
            r#"
            SELECT id, schedule, rate_millicents, effective_date_lower, effective_date_upper
            FROM tariff400ng_full_unpack_rates
            WHERE schedule = $1
              AND effective_date_lower <= $2 AND $2 < effective_date_upper
            ORDER BY effective_date_lower DESC, id ASC
            LIMIT 2
            "#,
        )
        .bind(query.schedule)
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(first_match(FullUnpackRate::TABLE, &query.describe(), rows))
    }

    pub async fn fetch_shorthaul_rate(
        &self,
        query: &ShorthaulQuery,
    ) -> Result<Option<ShorthaulRateRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ShorthaulRateRow>(
            r#"
            SELECT
                id, cwt_miles_lower, cwt_miles_upper, rate_cents,
                effective_date_lower, effective_date_upper
            FROM tariff400ng_shorthaul_rates
            WHERE cwt_miles_lower <= $1 AND $1 < cwt_miles_upper
              AND effective_date_lower <= $2 AND $2 < effective_date_upper
            ORDER BY effective_date_lower DESC, id ASC
            LIMIT 2
            "#,
        )
        .bind(query.cwt_miles.value())
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(first_match(ShorthaulRate::TABLE, &query.describe(), rows))
    }

    pub async fn fetch_service_area(
        &self,
        query: &ServiceAreaQuery,
    ) -> Result<Option<ServiceAreaRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ServiceAreaRow>(
            r#"
            SELECT
                id, name, service_area, services_schedule, linehaul_factor,
                service_charge_cents, sit_185a_rate_cents, sit_185b_rate_cents,
                sit_pd_schedule, effective_date_lower, effective_date_upper
            FROM tariff400ng_service_areas
            WHERE service_area = $1
              AND effective_date_lower <= $2 AND $2 < effective_date_upper
            ORDER BY effective_date_lower DESC, id ASC
            LIMIT 2
            "#,
        )
        .bind(query.service_area)
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(first_match(ServiceArea::TABLE, &query.describe(), rows))
    }

    /// A row without a schedule applies to every schedule
    pub async fn fetch_item_rate(
        &self,
        query: &ItemRateQuery,
    ) -> Result<Option<ItemRateRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ItemRateRow>(
            r#"
            SELECT
                id, code, schedule, weight_lbs_lower, weight_lbs_upper, rate_cents,
                effective_date_lower, effective_date_upper
            FROM tariff400ng_item_rates
            WHERE code = $1
              AND (schedule IS NULL OR schedule = $2)
              AND weight_lbs_lower <= $3 AND $3 < weight_lbs_upper
              AND effective_date_lower <= $4 AND $4 < effective_date_upper
            ORDER BY effective_date_lower DESC, id ASC
            LIMIT 2
            "#,
        )
        .bind(&query.code)
        .bind(query.schedule)
        .bind(query.weight.value())
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(first_match(ItemRate::TABLE, &query.describe(), rows))
    }

    pub async fn fetch_zip3(&self, zip3: &str) -> Result<Option<Zip3Row>, DatabaseError> {
        let row = sqlx::query_as::<_, Zip3Row>(
            r#"
            SELECT id, zip3, basepoint_city, state, service_area, rate_area, region
            FROM tariff400ng_zip3s
            WHERE zip3 = $1
            "#,
        )
        .bind(zip3)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ------------------------------------------------------------------------
    // Bulk inserts. Each call is one transaction: all rows land or none do.
    // ------------------------------------------------------------------------

    pub async fn insert_linehaul_rates(&self, rows: &[LinehaulRateRow]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_linehaul_rates (
                    id, distance_miles_lower, distance_miles_upper,
                    weight_lbs_lower, weight_lbs_upper, rate_cents, type,
                    effective_date_lower, effective_date_upper
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(row.id)
            .bind(row.distance_miles_lower)
            .bind(row.distance_miles_upper)
            .bind(row.weight_lbs_lower)
            .bind(row.weight_lbs_upper)
            .bind(row.rate_cents)
            .bind(&row.linehaul_type)
            .bind(row.effective_date_lower)
            .bind(row.effective_date_upper)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = LinehaulRate::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }

    pub async fn insert_full_pack_rates(&self, rows: &[FullPackRateRow]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_full_pack_rates (
                    id, schedule, weight_lbs_lower, weight_lbs_upper, rate_cents,
                    effective_date_lower, effective_date_upper
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(row.id)
            .bind(row.schedule)
            .bind(row.weight_lbs_lower)
            .bind(row.weight_lbs_upper)
            .bind(row.rate_cents)
            .bind(row.effective_date_lower)
            .bind(row.effective_date_upper)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = FullPackRate::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }

    pub async fn insert_full_unpack_rates(
        &self,
        rows: &[FullUnpackRateRow],
    ) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_full_unpack_rates (
                    id, schedule, rate_millicents, effective_date_lower, effective_date_upper
                )
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.id)
            .bind(row.schedule)
            .bind(row.rate_millicents)
            .bind(row.effective_date_lower)
            .bind(row.effective_date_upper)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = FullUnpackRate::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }

    pub async fn insert_shorthaul_rates(&self, rows: &[ShorthaulRateRow]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_shorthaul_rates (
                    id, cwt_miles_lower, cwt_miles_upper, rate_cents,
                    effective_date_lower, effective_date_upper
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(row.id)
            .bind(row.cwt_miles_lower)
            .bind(row.cwt_miles_upper)
            .bind(row.rate_cents)
            .bind(row.effective_date_lower)
            .bind(row.effective_date_upper)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = ShorthaulRate::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }

    pub async fn insert_service_areas(&self, rows: &[ServiceAreaRow]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_service_areas (
                    id, name, service_area, services_schedule, linehaul_factor,
                    service_charge_cents, sit_185a_rate_cents, sit_185b_rate_cents,
                    sit_pd_schedule, effective_date_lower, effective_date_upper
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(row.id)
            .bind(&row.name)
            .bind(row.service_area)
            .bind(row.services_schedule)
            .bind(row.linehaul_factor)
            .bind(row.service_charge_cents)
            .bind(row.sit_185a_rate_cents)
            .bind(row.sit_185b_rate_cents)
            .bind(row.sit_pd_schedule)
            .bind(row.effective_date_lower)
            .bind(row.effective_date_upper)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = ServiceArea::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }

    pub async fn insert_item_rates(&self, rows: &[ItemRateRow]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_item_rates (
                    id, code, schedule, weight_lbs_lower, weight_lbs_upper, rate_cents,
                    effective_date_lower, effective_date_upper
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(row.id)
            .bind(&row.code)
            .bind(row.schedule)
            .bind(row.weight_lbs_lower)
            .bind(row.weight_lbs_upper)
            .bind(row.rate_cents)
            .bind(row.effective_date_lower)
            .bind(row.effective_date_upper)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = ItemRate::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }

    pub async fn insert_zip3s(&self, rows: &[Zip3Row]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO tariff400ng_zip3s (
                    id, zip3, basepoint_city, state, service_area, rate_area, region
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(row.id)
            .bind(&row.zip3)
            .bind(&row.basepoint_city)
            .bind(&row.state)
            .bind(row.service_area)
            .bind(&row.rate_area)
            .bind(row.region)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(table = Zip3::TABLE, count = rows.len(), "Inserted rows");
        Ok(rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn linehaul_row() -> LinehaulRateRow {
        LinehaulRateRow {
            id: Uuid::now_v7(),
            distance_miles_lower: 1,
            distance_miles_upper: 10000,
            weight_lbs_lower: 1000,
            weight_lbs_upper: 4000,
            rate_cents: 20000,
            linehaul_type: "ConusLinehaul".to_string(),
            effective_date_lower: date(2019, 5, 15),
            effective_date_upper: date(2020, 5, 15),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let row = linehaul_row();
        assert!(row.check().is_empty());

        let rate = row.clone().into_domain().unwrap();
        assert_eq!(rate.rate_cents, Cents(20000));
        assert_eq!(LinehaulRateRow::from(&rate), row);
    }

    #[test]
    fn test_first_match_warns_when_rows_overlap() {
        let (chosen, logs) = test_utils::capture_logs(|| {
            first_match(ServiceArea::TABLE, "service area 68 on 2019-06-01", vec![1, 2])
        });
        assert_eq!(chosen, Some(1));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Multiple rate rows match"));
        assert!(logs.contains("service area 68 on 2019-06-01"));

        let (chosen, logs) = test_utils::capture_logs(|| first_match(ServiceArea::TABLE, "q", vec![7]));
        assert_eq!(chosen, Some(7));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_unknown_linehaul_type_is_reported_by_field() {
        let mut row = linehaul_row();
        row.linehaul_type = "ConusShorthaul".to_string();

        let errors = row.check();
        assert_eq!(
            errors.get("Type"),
            Some(&["Type is not in the list [ConusLinehaul, IntraAlaskaLinehaul].".to_string()][..])
        );
    }

    #[test]
    fn test_inverted_band_is_reported_by_field() {
        let mut row = linehaul_row();
        row.weight_lbs_upper = 1000;

        let errors = row.check();
        assert_eq!(
            errors.get("WeightLbsLower"),
            Some(&["WeightLbsLower must be less than WeightLbsUpper.".to_string()][..])
        );
        assert!(matches!(
            row.into_domain(),
            Err(DatabaseError::InvalidRow { table: "tariff400ng_linehaul_rates", .. })
        ));
    }

    #[test]
    fn test_unknown_linehaul_type() {
        let mut row = linehaul_row();
        row.linehaul_type = "Intergalactic".to_string();
        assert!(row.check().get("Row").is_some());
    }

    #[test]
    fn test_domain_rules_apply_after_bounds() {
        let row = ItemRateRow {
            id: Uuid::now_v7(),
            code: "105B".to_string(),
            schedule: Some(9),
            weight_lbs_lower: 0,
            weight_lbs_upper: 100,
            rate_cents: 4170,
            effective_date_lower: date(2019, 5, 15),
            effective_date_upper: date(2020, 5, 15),
        };
        assert!(row.check().get("Schedule").is_some());
    }

    #[test]
    fn test_csv_record_without_id_gets_one() {
        let data = "\
schedule,rate_millicents,effective_date_lower,effective_date_upper
1,541491,2019-05-15,2020-05-15
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<FullUnpackRateRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].id.is_nil());
        assert_eq!(rows[0].rate_millicents, 541_491);
    }

    #[test]
    fn test_first_match_keeps_order() {
        assert_eq!(first_match("t", "q", vec![3, 1]), Some(3));
        assert_eq!(first_match::<i32>("t", "q", vec![]), None);
    }
}
