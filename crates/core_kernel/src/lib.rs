//! Core Kernel - Foundational types shared by the relocation data model
//!
//! This crate provides the building blocks used by the domain crates:
//! - Units of measure (cents, millicents, pounds, miles, cwt-miles)
//! - Half-open ranges for rate bands and effective dates
//! - Strongly typed identifiers
//! - Declarative field validation
//! - Port infrastructure for adapters

pub mod unit;
pub mod range;
pub mod clock;
pub mod validation;
pub mod identifiers;
pub mod ports;

pub use unit::{Cents, Millicents, Pound, Cwt, Miles, CwtMiles};
pub use range::{HalfOpenRange, EffectiveDates, RangeError};
pub use clock::{Clock, SystemClock, FixedClock};
pub use validation::{
    Constraint, FieldBound, FieldRule, FieldValue, Validatable, ValidationErrors,
};
pub use identifiers::{ReimbursementId, RateId, Zip3Id};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
