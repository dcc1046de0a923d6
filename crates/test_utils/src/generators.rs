//! Property-Based Test Generators
//!
//! Proptest strategies that respect the domain invariants: bands are never
//! inverted and amounts are in range for their columns.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use core_kernel::{Cents, EffectiveDates, HalfOpenRange, Pound, RateId};
use domain_reimbursement::{MethodOfReceipt, ReimbursementAction, ReimbursementStatus};

/// Any lifecycle action
pub fn action_strategy() -> impl Strategy<Value = ReimbursementAction> {
    prop::sample::select(ReimbursementAction::ALL.to_vec())
}

/// Any stored status
pub fn status_strategy() -> impl Strategy<Value = ReimbursementStatus> {
    prop::sample::select(ReimbursementStatus::ALL.to_vec())
}

pub fn method_strategy() -> impl Strategy<Value = MethodOfReceipt> {
    prop::sample::select(MethodOfReceipt::ALL.to_vec())
}

/// Requested amounts that pass validation
pub fn positive_cents_strategy() -> impl Strategy<Value = Cents> {
    (1i64..100_000_000i64).prop_map(Cents)
}

/// Days from 2015 through roughly 2025
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650i64).prop_map(|days| NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(days))
}

/// Effective windows of one day to two years
pub fn effective_dates_strategy() -> impl Strategy<Value = EffectiveDates> {
    (date_strategy(), 1i64..730i64).prop_map(|(lower, length)| {
        EffectiveDates::new(lower, lower + Duration::days(length)).expect("length is positive")
    })
}

/// Non-empty weight bands
pub fn weight_band_strategy() -> impl Strategy<Value = HalfOpenRange<Pound>> {
    (0i64..50_000i64, 1i64..20_000i64).prop_map(|(lower, width)| {
        HalfOpenRange::new(Pound(lower), Pound(lower + width)).expect("width is positive")
    })
}

pub fn rate_id_strategy() -> impl Strategy<Value = RateId> {
    any::<u128>().prop_map(|n| RateId::from_uuid(uuid::Uuid::from_u128(n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn effective_dates_contain_their_lower_bound(dates in effective_dates_strategy()) {
            prop_assert!(dates.contains(dates.lower()));
            prop_assert!(!dates.contains(dates.upper()));
        }

        #[test]
        fn weight_bands_are_not_empty(band in weight_band_strategy()) {
            prop_assert!(band.lower() < band.upper());
        }
    }
}
