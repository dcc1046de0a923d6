//! Full unpack rates, quoted in millicents per hundredweight

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    Constraint, EffectiveDates, FieldRule, FieldValue, Millicents, RateId, Validatable,
};
use crate::lookup::{RateQuery, RateRow};
use crate::rates::{SCHEDULE_MAX, SCHEDULE_MIN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullUnpackRate {
    pub id: RateId,
    pub schedule: i32,
    pub rate_millicents: Millicents,
    pub effective_dates: EffectiveDates,
}

impl RateRow for FullUnpackRate {
    const TABLE: &'static str = "tariff400ng_full_unpack_rates";

    fn id(&self) -> RateId {
        self.id
    }

    fn effective_dates(&self) -> EffectiveDates {
        self.effective_dates
    }
}

impl Validatable for FullUnpackRate {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            FieldRule::new("Schedule", FieldValue::Int(i64::from(self.schedule)))
                .with(Constraint::InRange { min: SCHEDULE_MIN, max: SCHEDULE_MAX }),
            FieldRule::new("RateMillicents", FieldValue::Int(self.rate_millicents.value()))
                .with(Constraint::GreaterThan(-1)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullUnpackQuery {
    pub schedule: i32,
    pub date: NaiveDate,
}

impl RateQuery for FullUnpackQuery {
    type Row = FullUnpackRate;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn matches(&self, row: &FullUnpackRate) -> bool {
        row.schedule == self.schedule
    }

    fn describe(&self) -> String {
        format!("schedule {} on {}", self.schedule, self.date)
    }
}
