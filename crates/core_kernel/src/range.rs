//! Half-open ranges for rate bands and effective-date windows
//!
//! Every bounded dimension of a tariff row (weight band, mileage band,
//! effective dates) is a `[lower, upper)` range: the lower bound is
//! inclusive and the upper bound is exclusive, so adjacent bands such as
//! `[0, 1000)` and `[1000, 2000)` never both contain the same point.
//!
//! `lower < upper` holds for every value of the type: both [`HalfOpenRange::new`]
//! and deserialization reject empty or inverted bounds.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to range construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid range: lower bound {lower} must be less than upper bound {upper}")]
    Inverted { lower: String, upper: String },
}

/// A `[lower, upper)` range over any ordered value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HalfOpenRange<T> {
    lower: T,
    upper: T,
}

impl<T: PartialOrd + Copy + fmt::Display> HalfOpenRange<T> {
    /// Creates a range, rejecting empty or inverted bounds
    pub fn new(lower: T, upper: T) -> Result<Self, RangeError> {
        if lower >= upper {
            return Err(RangeError::Inverted {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    /// Returns true if `lower <= value < upper`
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value < self.upper
    }

}

impl<'de, T> Deserialize<'de> for HalfOpenRange<T>
where
    T: Deserialize<'de> + PartialOrd + Copy + fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Bounds<T> {
            lower: T,
            upper: T,
        }

        let bounds = Bounds::<T>::deserialize(deserializer)?;
        HalfOpenRange::new(bounds.lower, bounds.upper).map_err(serde::de::Error::custom)
    }
}

impl<T: fmt::Display> fmt::Display for HalfOpenRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

/// Effective-date window of a reference-data row
pub type EffectiveDates = HalfOpenRange<NaiveDate>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let range = HalfOpenRange::new(1000i64, 4000).unwrap();
        assert!(range.contains(1000));
    }

    #[test]
    fn test_upper_bound_is_exclusive() {
        let range = HalfOpenRange::new(1000i64, 4000).unwrap();
        assert!(range.contains(3999));
        assert!(!range.contains(4000));
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert!(matches!(
            HalfOpenRange::new(5i64, 5),
            Err(RangeError::Inverted { .. })
        ));
        assert!(HalfOpenRange::new(6i64, 5).is_err());
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let band: HalfOpenRange<i64> =
            serde_json::from_str(r#"{"lower": 1000, "upper": 4000}"#).unwrap();
        assert_eq!(band, HalfOpenRange::new(1000, 4000).unwrap());

        let err = serde_json::from_str::<HalfOpenRange<i64>>(r#"{"lower": 4000, "upper": 1000}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must be less than"));

        assert!(serde_json::from_str::<HalfOpenRange<i64>>(r#"{"lower": 5, "upper": 5}"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_inverted_dates() {
        let result = serde_json::from_str::<EffectiveDates>(
            r#"{"lower": "2020-05-15", "upper": "2019-05-15"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_effective_dates() {
        let window = EffectiveDates::new(date(2019, 5, 15), date(2020, 5, 15)).unwrap();
        assert!(window.contains(date(2019, 5, 15)));
        assert!(window.contains(date(2020, 5, 14)));
        assert!(!window.contains(date(2020, 5, 15)));
        assert_eq!(window.to_string(), "[2019-05-15, 2020-05-15)");
    }
}
