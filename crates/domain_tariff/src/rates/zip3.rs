//! Three-digit ZIP prefixes and the service area that serves them

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use core_kernel::{Constraint, FieldRule, FieldValue, Validatable, Zip3Id};

static ZIP3_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}$").expect("valid zip3 pattern"));

static STATE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid state pattern"));

/// Maps a ZIP prefix to its base point city, service area and rate area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zip3 {
    pub id: Zip3Id,
    pub zip3: String,
    pub basepoint_city: String,
    pub state: String,
    pub service_area: i32,
    pub rate_area: String,
    pub region: i32,
}

impl Zip3 {
    pub const TABLE: &'static str = "tariff400ng_zip3s";

    /// First three digits of a postal code, `None` unless they are all digits
    pub fn prefix_of(postal_code: &str) -> Option<&str> {
        postal_code
            .get(..3)
            .filter(|prefix| ZIP3_FORMAT.is_match(prefix))
    }
}

impl Validatable for Zip3 {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            FieldRule::new("Zip3", FieldValue::Text(&self.zip3))
                .with(Constraint::Matches(&ZIP3_FORMAT)),
            FieldRule::new("BasepointCity", FieldValue::Text(&self.basepoint_city))
                .with(Constraint::NotBlank),
            FieldRule::new("State", FieldValue::Text(&self.state))
                .with(Constraint::Matches(&STATE_FORMAT)),
            FieldRule::new("ServiceArea", FieldValue::Int(i64::from(self.service_area)))
                .with(Constraint::GreaterThan(0)),
            FieldRule::new("RateArea", FieldValue::Text(&self.rate_area))
                .with(Constraint::NotBlank),
            FieldRule::new("Region", FieldValue::Int(i64::from(self.region)))
                .with(Constraint::GreaterThan(0)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn des_moines() -> Zip3 {
        Zip3 {
            id: Zip3Id::new(),
            zip3: "503".to_string(),
            basepoint_city: "Des Moines".to_string(),
            state: "IA".to_string(),
            service_area: 296,
            rate_area: "US53".to_string(),
            region: 7,
        }
    }

    #[test]
    fn test_valid_zip3() {
        assert!(des_moines().validate().is_empty());
    }

    #[test]
    fn test_zip3_must_be_three_digits() {
        for bad in ["50", "5031", "5a3", ""] {
            let mut zip = des_moines();
            zip.zip3 = bad.to_string();
            assert!(zip.validate().get("Zip3").is_some(), "{} should fail", bad);
        }
    }

    #[test]
    fn test_prefix_of() {
        assert_eq!(Zip3::prefix_of("50309"), Some("503"));
        assert_eq!(Zip3::prefix_of("503"), Some("503"));
        assert_eq!(Zip3::prefix_of("50"), None);
    }

    #[test]
    fn test_prefix_of_requires_digits() {
        assert_eq!(Zip3::prefix_of("ab123"), None);
        assert_eq!(Zip3::prefix_of("5o309"), None);
        assert_eq!(Zip3::prefix_of("é0309"), None);
    }
}
