//! Pre-built Test Fixtures
//!
//! Consistent reference data for the reimbursement and tariff tests. Rate
//! values follow the 2019 tariff year used across the suite.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

use core_kernel::{
    Cents, CwtMiles, EffectiveDates, FixedClock, HalfOpenRange, Millicents, Pound, RateId,
    ReimbursementId, Zip3Id,
};
use domain_reimbursement::{MethodOfReceipt, Reimbursement};
use domain_tariff::{FullPackRate, FullUnpackRate, ItemRate, ShorthaulRate, Zip3};

use crate::builders::{LinehaulRateBuilder, ServiceAreaBuilder};

/// The tariff year every fixture row is effective for
pub static TARIFF_YEAR: Lazy<EffectiveDates> = Lazy::new(|| {
    EffectiveDates::new(TemporalFixtures::year_start(), TemporalFixtures::year_end())
        .expect("tariff year bounds are ordered")
});

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// First day of the tariff year (inclusive)
    pub fn year_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 5, 15).unwrap()
    }

    /// First day after the tariff year (exclusive)
    pub fn year_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, 15).unwrap()
    }

    /// A date well inside the tariff year
    pub fn mid_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 10, 1).unwrap()
    }

    /// Instant used to stamp requested dates
    pub fn request_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 6, 3, 15, 30, 0).unwrap()
    }

    pub fn fixed_clock() -> FixedClock {
        FixedClock(Self::request_instant())
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    pub fn reimbursement_id() -> ReimbursementId {
        ReimbursementId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Deterministic rate id; lower `n` sorts first
    pub fn rate_id(n: u128) -> RateId {
        RateId::from_uuid(Uuid::from_u128(n))
    }
}

/// Fixture for reimbursement records
pub struct ReimbursementFixtures;

impl ReimbursementFixtures {
    /// The $12.00 direct-deposit draft from the lifecycle walkthrough
    pub fn draft() -> Reimbursement {
        let mut draft = Reimbursement::build_draft(Cents(1200), MethodOfReceipt::OtherDd);
        draft.id = IdFixtures::reimbursement_id();
        draft
    }

    pub fn requested() -> Reimbursement {
        Reimbursement::build_requested(
            Cents(4500),
            MethodOfReceipt::MilPay,
            &TemporalFixtures::fixed_clock(),
        )
    }
}

/// Fixture for tariff rows, one representative row per table
pub struct TariffFixtures;

impl TariffFixtures {
    pub fn linehaul_rate() -> domain_tariff::LinehaulRate {
        LinehaulRateBuilder::new().build()
    }

    pub fn full_pack_rate() -> FullPackRate {
        FullPackRate {
            id: RateId::new_v7(),
            schedule: 3,
            weight_lbs: HalfOpenRange::new(Pound(0), Pound(16001)).unwrap(),
            rate_cents: Cents(6130),
            effective_dates: *TARIFF_YEAR,
        }
    }

    pub fn full_unpack_rate() -> FullUnpackRate {
        FullUnpackRate {
            id: RateId::new_v7(),
            schedule: 1,
            rate_millicents: Millicents(541_491),
            effective_dates: *TARIFF_YEAR,
        }
    }

    pub fn shorthaul_rate() -> ShorthaulRate {
        ShorthaulRate {
            id: RateId::new_v7(),
            cwt_miles: HalfOpenRange::new(CwtMiles(0), CwtMiles(16001)).unwrap(),
            rate_cents: Cents(32834),
            effective_dates: *TARIFF_YEAR,
        }
    }

    pub fn service_area() -> domain_tariff::ServiceArea {
        ServiceAreaBuilder::new().build()
    }

    /// Bulky item rate that applies to every schedule
    pub fn item_rate() -> ItemRate {
        ItemRate {
            id: RateId::new_v7(),
            code: "105B".to_string(),
            schedule: None,
            weight_lbs: HalfOpenRange::new(Pound(0), Pound(i64::from(i32::MAX))).unwrap(),
            rate_cents: Cents(4170),
            effective_dates: *TARIFF_YEAR,
        }
    }

    /// Des Moines, IA, inside service area 296
    pub fn zip3() -> Zip3 {
        Zip3 {
            id: Zip3Id::new_v7(),
            zip3: "503".to_string(),
            basepoint_city: "Des Moines".to_string(),
            state: "IA".to_string(),
            service_area: 296,
            rate_area: "US53".to_string(),
            region: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Validatable;

    #[test]
    fn test_fixtures_are_valid() {
        assert!(ReimbursementFixtures::draft().validate().is_empty());
        assert!(ReimbursementFixtures::requested().validate().is_empty());
        assert!(TariffFixtures::full_pack_rate().validate().is_empty());
        assert!(TariffFixtures::item_rate().validate().is_empty());
        assert!(TariffFixtures::zip3().validate().is_empty());
    }

    #[test]
    fn test_tariff_year_is_half_open() {
        assert!(TARIFF_YEAR.contains(TemporalFixtures::year_start()));
        assert!(!TARIFF_YEAR.contains(TemporalFixtures::year_end()));
        assert_eq!(TARIFF_YEAR.lower(), TemporalFixtures::year_start());
        assert_eq!(TARIFF_YEAR.upper(), TemporalFixtures::year_end());
    }
}
