//! Linehaul rates, banded by distance and weight

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{
    Cents, Constraint, EffectiveDates, FieldRule, FieldValue, HalfOpenRange, Miles, Pound,
    RateId, Validatable,
};
use crate::error::TariffError;
use crate::lookup::{RateQuery, RateRow};

/// Kind of linehaul movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinehaulType {
    ConusLinehaul,
    IntraAlaskaLinehaul,
}

impl LinehaulType {
    /// Names accepted by `FromStr`
    pub const NAMES: &'static [&'static str] = &["ConusLinehaul", "IntraAlaskaLinehaul"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinehaulType::ConusLinehaul => "ConusLinehaul",
            LinehaulType::IntraAlaskaLinehaul => "IntraAlaskaLinehaul",
        }
    }
}

impl fmt::Display for LinehaulType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinehaulType {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ConusLinehaul" => Ok(LinehaulType::ConusLinehaul),
            "IntraAlaskaLinehaul" => Ok(LinehaulType::IntraAlaskaLinehaul),
            other => Err(TariffError::UnknownValue {
                kind: "linehaul type",
                value: other.to_string(),
            }),
        }
    }
}

/// Base linehaul price for a distance band and weight band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinehaulRate {
    pub id: RateId,
    pub distance_miles: HalfOpenRange<Miles>,
    pub weight_lbs: HalfOpenRange<Pound>,
    pub rate_cents: Cents,
    pub linehaul_type: LinehaulType,
    pub effective_dates: EffectiveDates,
}

impl RateRow for LinehaulRate {
    const TABLE: &'static str = "tariff400ng_linehaul_rates";

    fn id(&self) -> RateId {
        self.id
    }

    fn effective_dates(&self) -> EffectiveDates {
        self.effective_dates
    }
}

impl Validatable for LinehaulRate {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            FieldRule::new("RateCents", FieldValue::Int(self.rate_cents.value()))
                .with(Constraint::GreaterThan(-1)),
        ]
    }
}

/// Selects the linehaul row for a distance, weight and type on a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinehaulQuery {
    pub distance: Miles,
    pub weight: Pound,
    pub linehaul_type: LinehaulType,
    pub date: NaiveDate,
}

impl LinehaulQuery {
    /// Continental US linehaul, the base rate for domestic moves
    pub fn conus(distance: Miles, weight: Pound, date: NaiveDate) -> Self {
        Self {
            distance,
            weight,
            linehaul_type: LinehaulType::ConusLinehaul,
            date,
        }
    }
}

impl RateQuery for LinehaulQuery {
    type Row = LinehaulRate;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn matches(&self, row: &LinehaulRate) -> bool {
        row.linehaul_type == self.linehaul_type
            && row.distance_miles.contains(self.distance)
            && row.weight_lbs.contains(self.weight)
    }

    fn describe(&self) -> String {
        format!(
            "{} {} / {} on {}",
            self.linehaul_type, self.distance, self.weight, self.date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> LinehaulRate {
        LinehaulRate {
            id: RateId::new(),
            distance_miles: HalfOpenRange::new(Miles(1), Miles(10000)).unwrap(),
            weight_lbs: HalfOpenRange::new(Pound(1000), Pound(4000)).unwrap(),
            rate_cents: Cents(20000),
            linehaul_type: LinehaulType::ConusLinehaul,
            effective_dates: EffectiveDates::new(
                NaiveDate::from_ymd_opt(2019, 5, 15).unwrap(),
                NaiveDate::from_ymd_opt(2020, 5, 15).unwrap(),
            )
            .unwrap(),
        }
    }

    fn query(miles: i32, pounds: i64) -> LinehaulQuery {
        LinehaulQuery::conus(
            Miles(miles),
            Pound(pounds),
            NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_matches_inside_bands() {
        assert!(query(500, 2000).matches(&row()));
    }

    #[test]
    fn test_weight_upper_bound_excluded() {
        assert!(!query(500, 4000).matches(&row()));
        assert!(query(500, 3999).matches(&row()));
    }

    #[test]
    fn test_type_must_match() {
        let mut q = query(500, 2000);
        q.linehaul_type = LinehaulType::IntraAlaskaLinehaul;
        assert!(!q.matches(&row()));
    }

    #[test]
    fn test_validation() {
        assert!(row().validate().is_empty());

        let mut negative = row();
        negative.rate_cents = Cents(-1);
        assert!(negative.validate().get("RateCents").is_some());
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("ConusLinehaul".parse::<LinehaulType>().unwrap(), LinehaulType::ConusLinehaul);
        assert!("Ocean".parse::<LinehaulType>().is_err());
    }
}
