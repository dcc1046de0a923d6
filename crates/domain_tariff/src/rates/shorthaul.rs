//! Shorthaul rates, banded by hundredweight-miles

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    Cents, Constraint, CwtMiles, EffectiveDates, FieldRule, FieldValue, HalfOpenRange, RateId,
    Validatable,
};
use crate::lookup::{RateQuery, RateRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorthaulRate {
    pub id: RateId,
    pub cwt_miles: HalfOpenRange<CwtMiles>,
    pub rate_cents: Cents,
    pub effective_dates: EffectiveDates,
}

impl RateRow for ShorthaulRate {
    const TABLE: &'static str = "tariff400ng_shorthaul_rates";

    fn id(&self) -> RateId {
        self.id
    }

    fn effective_dates(&self) -> EffectiveDates {
        self.effective_dates
    }
}

impl Validatable for ShorthaulRate {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![FieldRule::new("RateCents", FieldValue::Int(self.rate_cents.value()))
            .with(Constraint::GreaterThan(-1))]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShorthaulQuery {
    pub cwt_miles: CwtMiles,
    pub date: NaiveDate,
}

impl RateQuery for ShorthaulQuery {
    type Row = ShorthaulRate;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn matches(&self, row: &ShorthaulRate) -> bool {
        row.cwt_miles.contains(self.cwt_miles)
    }

    fn describe(&self) -> String {
        format!("{} on {}", self.cwt_miles, self.date)
    }
}
