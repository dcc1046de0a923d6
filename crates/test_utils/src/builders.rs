//! Test Data Builders
//!
//! Builders for the rows tests most often vary: only the fields a test cares
//! about need to be set.

use chrono::NaiveDate;

use core_kernel::{
    Cents, Clock, EffectiveDates, HalfOpenRange, Miles, Pound, RateId,
};
use domain_reimbursement::{MethodOfReceipt, Reimbursement, ReimbursementStatus};
use domain_tariff::{LinehaulRate, LinehaulType, ServiceArea};

use crate::fixtures::{TemporalFixtures, TARIFF_YEAR};

/// Builder for linehaul rows
pub struct LinehaulRateBuilder {
    id: RateId,
    miles: (i32, i32),
    weight: (i64, i64),
    rate_cents: i64,
    linehaul_type: LinehaulType,
    effective_dates: EffectiveDates,
}

impl Default for LinehaulRateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LinehaulRateBuilder {
    /// 1-10000 miles, 1000-4000 lbs, $200.00
    pub fn new() -> Self {
        Self {
            id: RateId::new_v7(),
            miles: (1, 10000),
            weight: (1000, 4000),
            rate_cents: 20000,
            linehaul_type: LinehaulType::ConusLinehaul,
            effective_dates: *TARIFF_YEAR,
        }
    }

    pub fn with_id(mut self, id: RateId) -> Self {
        self.id = id;
        self
    }

    pub fn with_miles(mut self, lower: i32, upper: i32) -> Self {
        self.miles = (lower, upper);
        self
    }

    pub fn with_weight(mut self, lower: i64, upper: i64) -> Self {
        self.weight = (lower, upper);
        self
    }

    pub fn with_rate_cents(mut self, cents: i64) -> Self {
        self.rate_cents = cents;
        self
    }

    pub fn with_type(mut self, linehaul_type: LinehaulType) -> Self {
        self.linehaul_type = linehaul_type;
        self
    }

    /// # Panics
    ///
    /// Panics if `lower` is not before `upper`.
    pub fn effective(mut self, lower: NaiveDate, upper: NaiveDate) -> Self {
        self.effective_dates = EffectiveDates::new(lower, upper).unwrap();
        self
    }

    /// # Panics
    ///
    /// Panics if a band is inverted.
    pub fn build(self) -> LinehaulRate {
        LinehaulRate {
            id: self.id,
            distance_miles: HalfOpenRange::new(Miles(self.miles.0), Miles(self.miles.1)).unwrap(),
            weight_lbs: HalfOpenRange::new(Pound(self.weight.0), Pound(self.weight.1)).unwrap(),
            rate_cents: Cents(self.rate_cents),
            linehaul_type: self.linehaul_type,
            effective_dates: self.effective_dates,
        }
    }
}

/// Builder for service area rows
pub struct ServiceAreaBuilder {
    area: ServiceArea,
}

impl Default for ServiceAreaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceAreaBuilder {
    /// Service area 296 (Des Moines, IA)
    pub fn new() -> Self {
        Self {
            area: ServiceArea {
                id: RateId::new_v7(),
                name: "Des Moines, IA".to_string(),
                service_area: 296,
                services_schedule: 3,
                linehaul_factor: Cents(57),
                service_charge_cents: Cents(350),
                sit_185a_rate_cents: Cents(1402),
                sit_185b_rate_cents: Cents(53),
                sit_pd_schedule: 3,
                effective_dates: *TARIFF_YEAR,
            },
        }
    }

    pub fn with_id(mut self, id: RateId) -> Self {
        self.area.id = id;
        self
    }

    pub fn with_code(mut self, service_area: i32) -> Self {
        self.area.service_area = service_area;
        self
    }

    pub fn with_service_charge(mut self, cents: i64) -> Self {
        self.area.service_charge_cents = Cents(cents);
        self
    }

    pub fn effective(mut self, lower: NaiveDate, upper: NaiveDate) -> Self {
        self.area.effective_dates = EffectiveDates::new(lower, upper).unwrap();
        self
    }

    pub fn build(self) -> ServiceArea {
        self.area
    }
}

/// Builder for reimbursements in any lifecycle status
pub struct ReimbursementBuilder {
    amount: Cents,
    method: MethodOfReceipt,
    status: ReimbursementStatus,
    clock: Box<dyn Clock>,
}

impl Default for ReimbursementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReimbursementBuilder {
    pub fn new() -> Self {
        Self {
            amount: Cents(1200),
            method: MethodOfReceipt::OtherDd,
            status: ReimbursementStatus::Draft,
            clock: Box::new(TemporalFixtures::fixed_clock()),
        }
    }

    pub fn with_amount(mut self, amount: Cents) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_method(mut self, method: MethodOfReceipt) -> Self {
        self.method = method;
        self
    }

    /// Walks the record through the legal path to `status`
    pub fn in_status(mut self, status: ReimbursementStatus) -> Self {
        self.status = status;
        self
    }

    /// # Panics
    ///
    /// Never for reachable statuses; every path below is legal.
    pub fn build(self) -> Reimbursement {
        use domain_reimbursement::ReimbursementAction::*;

        let path: &[_] = match self.status {
            ReimbursementStatus::Draft => &[],
            ReimbursementStatus::Requested => &[Request],
            ReimbursementStatus::Approved => &[Request, Approve],
            ReimbursementStatus::Paid => &[Request, Approve, Pay],
            ReimbursementStatus::Rejected => &[Request, Reject],
        };

        let mut reimbursement = Reimbursement::build_draft(self.amount, self.method);
        for action in path {
            reimbursement
                .perform(*action, self.clock.as_ref())
                .expect("builder path is legal");
        }
        reimbursement
    }
}
