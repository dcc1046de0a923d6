//! Accessorial item rates keyed by item code

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    Cents, Constraint, EffectiveDates, FieldRule, FieldValue, HalfOpenRange, Pound, RateId,
    Validatable,
};
use crate::lookup::{RateQuery, RateRow};
use crate::rates::{SCHEDULE_MAX, SCHEDULE_MIN};

/// Price of an accessorial item for a weight band
///
/// A row without a schedule applies to every schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRate {
    pub id: RateId,
    pub code: String,
    pub schedule: Option<i32>,
    pub weight_lbs: HalfOpenRange<Pound>,
    pub rate_cents: Cents,
    pub effective_dates: EffectiveDates,
}

impl RateRow for ItemRate {
    const TABLE: &'static str = "tariff400ng_item_rates";

    fn id(&self) -> RateId {
        self.id
    }

    fn effective_dates(&self) -> EffectiveDates {
        self.effective_dates
    }
}

impl Validatable for ItemRate {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        let mut rules = vec![
            FieldRule::new("Code", FieldValue::Text(&self.code)).with(Constraint::NotBlank),
            FieldRule::new("RateCents", FieldValue::Int(self.rate_cents.value()))
                .with(Constraint::GreaterThan(-1)),
        ];
        if let Some(schedule) = self.schedule {
            rules.push(
                FieldRule::new("Schedule", FieldValue::Int(i64::from(schedule)))
                    .with(Constraint::InRange { min: SCHEDULE_MIN, max: SCHEDULE_MAX }),
            );
        }
        rules
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRateQuery {
    pub code: String,
    pub schedule: Option<i32>,
    pub weight: Pound,
    pub date: NaiveDate,
}

impl RateQuery for ItemRateQuery {
    type Row = ItemRate;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn matches(&self, row: &ItemRate) -> bool {
        let schedule_matches = match row.schedule {
            None => true,
            Some(schedule) => self.schedule == Some(schedule),
        };
        row.code == self.code && schedule_matches && row.weight_lbs.contains(self.weight)
    }

    fn describe(&self) -> String {
        match self.schedule {
            Some(schedule) => format!(
                "code {} schedule {} / {} on {}",
                self.code, schedule, self.weight, self.date
            ),
            None => format!("code {} / {} on {}", self.code, self.weight, self.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(schedule: Option<i32>) -> ItemRate {
        ItemRate {
            id: RateId::new(),
            code: "105B".to_string(),
            schedule,
            weight_lbs: HalfOpenRange::new(Pound(0), Pound(2147483647)).unwrap(),
            rate_cents: Cents(4170),
            effective_dates: EffectiveDates::new(
                NaiveDate::from_ymd_opt(2019, 5, 15).unwrap(),
                NaiveDate::from_ymd_opt(2020, 5, 15).unwrap(),
            )
            .unwrap(),
        }
    }

    fn query(schedule: Option<i32>) -> ItemRateQuery {
        ItemRateQuery {
            code: "105B".to_string(),
            schedule,
            weight: Pound(1000),
            date: NaiveDate::from_ymd_opt(2019, 9, 1).unwrap(),
        }
    }

    #[test]
    fn test_unscheduled_row_matches_any_schedule() {
        assert!(query(Some(2)).matches(&row(None)));
        assert!(query(None).matches(&row(None)));
    }

    #[test]
    fn test_scheduled_row_needs_same_schedule() {
        assert!(query(Some(2)).matches(&row(Some(2))));
        assert!(!query(Some(1)).matches(&row(Some(2))));
        assert!(!query(None).matches(&row(Some(2))));
    }

    #[test]
    fn test_code_must_match() {
        let mut q = query(None);
        q.code = "105C".to_string();
        assert!(!q.matches(&row(None)));
    }
}
