//! Reimbursement Domain
//!
//! Tracks a member's request to be reimbursed for relocation expenses
//! through a fixed approval lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Draft -> Requested -> Approved -> Paid
//!              |
//!              +-> Rejected
//! ```
//!
//! `Paid` and `Rejected` are terminal.

pub mod reimbursement;
pub mod ports;
pub mod service;
pub mod error;

pub use reimbursement::{
    MethodOfReceipt, Reimbursement, ReimbursementAction, ReimbursementStatus,
};
pub use ports::ReimbursementPort;
pub use service::ReimbursementService;
pub use error::ReimbursementError;
