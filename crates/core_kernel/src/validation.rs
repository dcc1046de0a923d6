//! Declarative field validation
//!
//! Records describe their fields as a list of [`FieldRule`]s, each pairing
//! a field value with the constraints it must satisfy. [`Validatable::validate`]
//! evaluates every rule the same way and collects the violations per field.
//!
//! ```rust
//! use core_kernel::validation::{Constraint, FieldRule, FieldValue, Validatable};
//!
//! struct Schedule { value: i64 }
//!
//! impl Validatable for Schedule {
//!     fn rules(&self) -> Vec<FieldRule<'_>> {
//!         vec![FieldRule::new("Schedule", FieldValue::Int(self.value))
//!             .with(Constraint::InRange { min: 1, max: 3 })]
//!     }
//! }
//!
//! let errors = Schedule { value: 4 }.validate();
//! assert!(errors.has_any());
//! ```
//!
//! [`Constraint::Matches`] takes a compiled `&'static Regex`, usually a
//! `once_cell::sync::Lazy` static next to the record:
//!
//! ```rust,ignore
//! static ZIP3_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}$").expect("valid zip3 pattern"));
//!
//! FieldRule::new("Zip3", FieldValue::Text(&self.zip3)).with(Constraint::Matches(&ZIP3_FORMAT))
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// A single field value as seen by the validator
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
    OptionalText(Option<&'a str>),
    OptionalTime(Option<DateTime<Utc>>),
    Date(NaiveDate),
    Uuid(Uuid),
}

/// A constraint on a field
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must be present (non-nil uuid, some time, some text)
    Required,
    /// Text must contain a non-whitespace character; `None` passes
    NotBlank,
    /// Integer must be strictly greater than the bound
    GreaterThan(i64),
    /// Integer must lie in `[min, max]`
    InRange { min: i64, max: i64 },
    /// Text must equal one of the listed values
    OneOf(&'static [&'static str]),
    /// Text must match the regular expression; `None` passes
    Matches(&'static Regex),
    /// Integer or date must be strictly less than the named other value
    LessThan {
        other_field: &'static str,
        other: FieldBound,
    },
}

/// Comparison target for [`Constraint::LessThan`]
#[derive(Debug, Clone, Copy)]
pub enum FieldBound {
    Int(i64),
    Date(NaiveDate),
}

/// A field and the constraints that apply to it
#[derive(Debug, Clone)]
pub struct FieldRule<'a> {
    pub field: &'static str,
    pub value: FieldValue<'a>,
    pub constraints: Vec<Constraint>,
}

impl<'a> FieldRule<'a> {
    pub fn new(field: &'static str, value: FieldValue<'a>) -> Self {
        Self {
            field,
            value,
            constraints: Vec::new(),
        }
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Evaluates every constraint, returning one message per violation
    pub fn check(&self) -> Vec<String> {
        self.constraints
            .iter()
            .filter_map(|constraint| violation(self.field, &self.value, constraint))
            .collect()
    }
}

fn violation(field: &str, value: &FieldValue<'_>, constraint: &Constraint) -> Option<String> {
    match (constraint, value) {
        (Constraint::Required, FieldValue::Uuid(id)) if id.is_nil() => {
            Some(format!("{} can not be blank.", field))
        }
        (Constraint::Required, FieldValue::Text(s)) if s.is_empty() => {
            Some(format!("{} can not be blank.", field))
        }
        (Constraint::Required, FieldValue::OptionalText(None))
        | (Constraint::Required, FieldValue::OptionalTime(None)) => {
            Some(format!("{} can not be blank.", field))
        }
        (Constraint::Required, _) => None,

        (Constraint::NotBlank, FieldValue::Text(s))
        | (Constraint::NotBlank, FieldValue::OptionalText(Some(s))) => {
            (s.trim().is_empty()).then(|| format!("{} can not be blank.", field))
        }
        (Constraint::NotBlank, _) => None,

        (Constraint::GreaterThan(bound), FieldValue::Int(v)) => {
            (*v <= *bound).then(|| format!("{} must be greater than {}.", field, bound))
        }
        (Constraint::InRange { min, max }, FieldValue::Int(v)) => (*v < *min || *v > *max)
            .then(|| format!("{} must be between {} and {}.", field, min, max)),

        (Constraint::OneOf(allowed), FieldValue::Text(s))
        | (Constraint::OneOf(allowed), FieldValue::OptionalText(Some(s))) => {
            (!allowed.iter().any(|candidate| candidate == s)).then(|| {
                format!("{} is not in the list [{}].", field, allowed.join(", "))
            })
        }
        (Constraint::OneOf(_), _) => None,

        (Constraint::Matches(pattern), FieldValue::Text(s))
        | (Constraint::Matches(pattern), FieldValue::OptionalText(Some(s))) => {
            (!pattern.is_match(s)).then(|| format!("{} does not match the expected format.", field))
        }
        (Constraint::Matches(_), _) => None,

        (Constraint::LessThan { other_field, other: FieldBound::Int(upper) }, FieldValue::Int(v)) => {
            (*v >= *upper).then(|| format!("{} must be less than {}.", field, other_field))
        }
        (Constraint::LessThan { other_field, other: FieldBound::Date(upper) }, FieldValue::Date(d)) => {
            (*d >= *upper).then(|| format!("{} must be less than {}.", field, other_field))
        }

        (constraint, value) => Some(format!(
            "{} cannot apply {:?} to {:?}.",
            field, constraint, value
        )),
    }
}

/// Violation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn has_any(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    /// Converts to `Err(self)` when any violation was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.has_any() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Records that describe their field constraints declaratively
pub trait Validatable {
    fn rules(&self) -> Vec<FieldRule<'_>>;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in self.rules() {
            for message in rule.check() {
                errors.add(rule.field, message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static TAC_FORMAT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4}$").expect("valid TAC pattern"));

    struct Sample<'a> {
        amount: i64,
        method: &'a str,
        tac: Option<&'a str>,
        weight_lower: i64,
        weight_upper: i64,
    }

    impl Validatable for Sample<'_> {
        fn rules(&self) -> Vec<FieldRule<'_>> {
            vec![
                FieldRule::new("RequestedAmount", FieldValue::Int(self.amount))
                    .with(Constraint::GreaterThan(0)),
                FieldRule::new("MethodOfReceipt", FieldValue::Text(self.method))
                    .with(Constraint::Required)
                    .with(Constraint::OneOf(&["MIL_PAY", "OTHER_DD", "GTCC"])),
                FieldRule::new("TAC", FieldValue::OptionalText(self.tac))
                    .with(Constraint::NotBlank)
                    .with(Constraint::Matches(&TAC_FORMAT)),
                FieldRule::new("WeightLbsLower", FieldValue::Int(self.weight_lower)).with(
                    Constraint::LessThan {
                        other_field: "WeightLbsUpper",
                        other: FieldBound::Int(self.weight_upper),
                    },
                ),
            ]
        }
    }

    fn valid() -> Sample<'static> {
        Sample {
            amount: 1200,
            method: "MIL_PAY",
            tac: None,
            weight_lower: 0,
            weight_upper: 1000,
        }
    }

    #[test]
    fn test_valid_record_has_no_errors() {
        assert!(valid().validate().is_empty());
        assert!(valid().validate().into_result().is_ok());
    }

    #[test]
    fn test_errors_are_keyed_by_field() {
        let sample = Sample {
            amount: 0,
            method: "CASH",
            ..valid()
        };
        let errors = sample.validate();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["MethodOfReceipt", "RequestedAmount"]);
        assert_eq!(
            errors.get("RequestedAmount").unwrap(),
            &["RequestedAmount must be greater than 0.".to_string()]
        );
    }

    #[test]
    fn test_empty_text_fails_required_and_one_of() {
        let errors = Sample { method: "", ..valid() }.validate();
        assert_eq!(errors.get("MethodOfReceipt").unwrap().len(), 2);
    }

    #[test]
    fn test_optional_text_checked_only_when_present() {
        assert!(Sample { tac: Some("E19A"), ..valid() }.validate().is_empty());

        let errors = Sample { tac: Some("E1*"), ..valid() }.validate();
        assert!(errors.get("TAC").is_some());

        let errors = Sample { tac: Some("   "), ..valid() }.validate();
        assert_eq!(errors.get("TAC").unwrap().len(), 2);
    }

    #[test]
    fn test_less_than_rejects_equal_bounds() {
        let errors = Sample { weight_lower: 1000, ..valid() }.validate();
        assert_eq!(
            errors.get("WeightLbsLower").unwrap(),
            &["WeightLbsLower must be less than WeightLbsUpper.".to_string()]
        );
    }

    #[test]
    fn test_merge_and_display() {
        let mut errors = ValidationErrors::new();
        errors.add("Status", "Status can not be blank.");
        let mut other = ValidationErrors::new();
        other.add("Status", "Status is not in the list [DRAFT].");
        errors.merge(other);

        assert_eq!(errors.get("Status").unwrap().len(), 2);
        assert!(errors.to_string().starts_with("Status: "));
    }

    #[test]
    fn test_mismatched_constraint_is_reported() {
        let rule = FieldRule::new("ID", FieldValue::Uuid(Uuid::new_v4()))
            .with(Constraint::GreaterThan(0));
        assert_eq!(rule.check().len(), 1);
    }
}
