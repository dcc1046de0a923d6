//! Units of measure used by records and tariff tables
//!
//! Prices are integer minor currency units so that rate rows round-trip
//! through the database without floating-point drift. Dollar display goes
//! through rust_decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// US cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns the amount in dollars
    pub fn to_dollars(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_dollars())
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Cents(value)
    }
}

/// Thousandths of a cent, used by rates quoted below cent precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millicents(pub i64);

impl Millicents {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Millicents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} millicents", self.0)
    }
}

/// Weight in pounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pound(pub i64);

impl Pound {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts to hundredweight, rounding down
    pub fn to_cwt(&self) -> Cwt {
        Cwt(self.0 / 100)
    }
}

impl fmt::Display for Pound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lbs", self.0)
    }
}

/// Hundredweight (100 lbs)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cwt(pub i64);

impl Cwt {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Distance in statute miles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Miles(pub i32);

impl Miles {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Miles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mi", self.0)
    }
}

/// Hundredweight multiplied by miles, the shorthaul rating basis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CwtMiles(pub i64);

impl CwtMiles {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn from_weight_and_distance(weight: Pound, distance: Miles) -> Self {
        Self(weight.to_cwt().value() * i64::from(distance.value()))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CwtMiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cwt-mi", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cwt_miles_never_exceeds_pound_miles(
            pounds in 0i64..1_000_000i64,
            miles in 0i32..5_000i32
        ) {
            let cwt_miles = CwtMiles::from_weight_and_distance(Pound(pounds), Miles(miles));
            prop_assert!(cwt_miles.value() * 100 <= pounds * i64::from(miles));
        }
    }
}
