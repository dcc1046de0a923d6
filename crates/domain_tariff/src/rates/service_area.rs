//! Service areas and their schedule-dependent charges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    Cents, Constraint, EffectiveDates, FieldRule, FieldValue, RateId, Validatable,
};
use crate::lookup::{RateQuery, RateRow};
use crate::rates::{SCHEDULE_MAX, SCHEDULE_MIN};

/// Charges and schedules that apply inside one service area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub id: RateId,
    pub name: String,
    pub service_area: i32,
    pub services_schedule: i32,
    pub linehaul_factor: Cents,
    pub service_charge_cents: Cents,
    pub sit_185a_rate_cents: Cents,
    pub sit_185b_rate_cents: Cents,
    pub sit_pd_schedule: i32,
    pub effective_dates: EffectiveDates,
}

impl RateRow for ServiceArea {
    const TABLE: &'static str = "tariff400ng_service_areas";

    fn id(&self) -> RateId {
        self.id
    }

    fn effective_dates(&self) -> EffectiveDates {
        self.effective_dates
    }
}

impl Validatable for ServiceArea {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        let schedule = Constraint::InRange { min: SCHEDULE_MIN, max: SCHEDULE_MAX };
        vec![
            FieldRule::new("Name", FieldValue::Text(&self.name)).with(Constraint::NotBlank),
            FieldRule::new("ServiceArea", FieldValue::Int(i64::from(self.service_area)))
                .with(Constraint::GreaterThan(0)),
            FieldRule::new("ServicesSchedule", FieldValue::Int(i64::from(self.services_schedule)))
                .with(schedule.clone()),
            FieldRule::new("SITPDSchedule", FieldValue::Int(i64::from(self.sit_pd_schedule)))
                .with(schedule),
            FieldRule::new("LinehaulFactor", FieldValue::Int(self.linehaul_factor.value()))
                .with(Constraint::GreaterThan(-1)),
            FieldRule::new("ServiceChargeCents", FieldValue::Int(self.service_charge_cents.value()))
                .with(Constraint::GreaterThan(-1)),
            FieldRule::new("SIT185ARateCents", FieldValue::Int(self.sit_185a_rate_cents.value()))
                .with(Constraint::GreaterThan(-1)),
            FieldRule::new("SIT185BRateCents", FieldValue::Int(self.sit_185b_rate_cents.value()))
                .with(Constraint::GreaterThan(-1)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAreaQuery {
    pub service_area: i32,
    pub date: NaiveDate,
}

impl RateQuery for ServiceAreaQuery {
    type Row = ServiceArea;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn matches(&self, row: &ServiceArea) -> bool {
        row.service_area == self.service_area
    }

    fn describe(&self) -> String {
        format!("service area {} on {}", self.service_area, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_reports_each_field() {
        let area = ServiceArea {
            id: RateId::new(),
            name: " ".to_string(),
            service_area: 296,
            services_schedule: 0,
            linehaul_factor: Cents(57),
            service_charge_cents: Cents(350),
            sit_185a_rate_cents: Cents(1402),
            sit_185b_rate_cents: Cents(53),
            sit_pd_schedule: 3,
            effective_dates: EffectiveDates::new(
                NaiveDate::from_ymd_opt(2019, 5, 15).unwrap(),
                NaiveDate::from_ymd_opt(2020, 5, 15).unwrap(),
            )
            .unwrap(),
        };

        let errors = area.validate();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["Name", "ServicesSchedule"]);
    }
}
