//! Custom Test Assertions
//!
//! Assertion helpers that print the offending value on failure.

use std::fmt::Debug;

use core_kernel::ValidationErrors;
use domain_reimbursement::{ReimbursementError, ReimbursementStatus};
use domain_tariff::TariffError;

/// Asserts that `errors` carries exactly `message` for `field`
pub fn assert_field_error(errors: &ValidationErrors, field: &str, message: &str) {
    match errors.get(field) {
        Some(messages) => assert!(
            messages.iter().any(|m| m == message),
            "Expected {:?} on {}, got {:?}",
            message,
            field,
            messages
        ),
        None => panic!("Expected an error on {}, got {}", field, errors),
    }
}

/// Asserts that validation passed
pub fn assert_valid(errors: &ValidationErrors) {
    assert!(errors.is_empty(), "Expected no validation errors, got {}", errors);
}

/// Asserts that an action was refused from `from`
pub fn assert_transition_rejected<T: Debug>(
    result: Result<T, ReimbursementError>,
    from: ReimbursementStatus,
) {
    match result {
        Err(ReimbursementError::InvalidTransition { from: actual, .. }) => assert_eq!(
            actual, from,
            "Transition refused from {} but expected {}",
            actual, from
        ),
        other => panic!("Expected InvalidTransition from {}, got {:?}", from, other),
    }
}

/// Asserts that a lookup found no row in `expected_table`
pub fn assert_rate_not_found<T: Debug>(result: Result<T, TariffError>, expected_table: &str) {
    match result {
        Err(TariffError::NotFound { table, .. }) => assert_eq!(
            table, expected_table,
            "NotFound for the wrong table"
        ),
        other => panic!("Expected NotFound in {}, got {:?}", expected_table, other),
    }
}
