//! Full pack rates per services schedule and weight band

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    Cents, Constraint, EffectiveDates, FieldRule, FieldValue, HalfOpenRange, Pound, RateId,
    Validatable,
};
use crate::lookup::{RateQuery, RateRow};
use crate::rates::{SCHEDULE_MAX, SCHEDULE_MIN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullPackRate {
    pub id: RateId,
    pub schedule: i32,
    pub weight_lbs: HalfOpenRange<Pound>,
    pub rate_cents: Cents,
    pub effective_dates: EffectiveDates,
}

impl RateRow for FullPackRate {
    const TABLE: &'static str = "tariff400ng_full_pack_rates";

    fn id(&self) -> RateId {
        self.id
    }

    fn effective_dates(&self) -> EffectiveDates {
        self.effective_dates
    }
}

impl Validatable for FullPackRate {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            FieldRule::new("Schedule", FieldValue::Int(i64::from(self.schedule)))
                .with(Constraint::InRange { min: SCHEDULE_MIN, max: SCHEDULE_MAX }),
            FieldRule::new("RateCents", FieldValue::Int(self.rate_cents.value()))
                .with(Constraint::GreaterThan(-1)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullPackQuery {
    pub schedule: i32,
    pub weight: Pound,
    pub date: NaiveDate,
}

impl RateQuery for FullPackQuery {
    type Row = FullPackRate;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn matches(&self, row: &FullPackRate) -> bool {
        row.schedule == self.schedule && row.weight_lbs.contains(self.weight)
    }

    fn describe(&self) -> String {
        format!("schedule {} / {} on {}", self.schedule, self.weight, self.date)
    }
}
