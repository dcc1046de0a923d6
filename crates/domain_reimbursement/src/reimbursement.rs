//! Reimbursement record and status lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{
    Cents, Clock, Constraint, FieldRule, FieldValue, ReimbursementId, SystemClock, Validatable,
};
use crate::error::ReimbursementError;

/// Reimbursement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReimbursementStatus {
    /// Being prepared by the member
    Draft,
    /// Submitted for review
    Requested,
    /// Approved by the office
    Approved,
    /// Disbursed
    Paid,
    /// Denied by the office
    Rejected,
}

impl ReimbursementStatus {
    pub const ALL: [ReimbursementStatus; 5] = [
        ReimbursementStatus::Draft,
        ReimbursementStatus::Requested,
        ReimbursementStatus::Approved,
        ReimbursementStatus::Paid,
        ReimbursementStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReimbursementStatus::Draft => "DRAFT",
            ReimbursementStatus::Requested => "REQUESTED",
            ReimbursementStatus::Approved => "APPROVED",
            ReimbursementStatus::Paid => "PAID",
            ReimbursementStatus::Rejected => "REJECTED",
        }
    }

    /// No action leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReimbursementStatus::Paid | ReimbursementStatus::Rejected)
    }
}

impl fmt::Display for ReimbursementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReimbursementStatus {
    type Err = ReimbursementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReimbursementStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ReimbursementError::UnknownValue {
                kind: "reimbursement status",
                value: s.to_string(),
            })
    }
}

/// How the member receives the money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodOfReceipt {
    /// Added to military pay
    #[serde(rename = "MIL_PAY")]
    MilPay,
    /// Direct deposit to another account
    #[serde(rename = "OTHER_DD", alias = "OTHER")]
    OtherDd,
    /// Government travel charge card
    #[serde(rename = "GTCC")]
    Gtcc,
}

impl MethodOfReceipt {
    pub const ALL: [MethodOfReceipt; 3] = [
        MethodOfReceipt::MilPay,
        MethodOfReceipt::OtherDd,
        MethodOfReceipt::Gtcc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodOfReceipt::MilPay => "MIL_PAY",
            MethodOfReceipt::OtherDd => "OTHER_DD",
            MethodOfReceipt::Gtcc => "GTCC",
        }
    }
}

impl fmt::Display for MethodOfReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodOfReceipt {
    type Err = ReimbursementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MIL_PAY" => Ok(MethodOfReceipt::MilPay),
            "OTHER_DD" | "OTHER" => Ok(MethodOfReceipt::OtherDd),
            "GTCC" => Ok(MethodOfReceipt::Gtcc),
            other => Err(ReimbursementError::UnknownValue {
                kind: "method of receipt",
                value: other.to_string(),
            }),
        }
    }
}

/// An action that moves a reimbursement between statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementAction {
    Request,
    Approve,
    Reject,
    Pay,
}

impl ReimbursementAction {
    pub const ALL: [ReimbursementAction; 4] = [
        ReimbursementAction::Request,
        ReimbursementAction::Approve,
        ReimbursementAction::Reject,
        ReimbursementAction::Pay,
    ];

    /// Status reached by taking this action from `from`, if the action is legal there
    pub fn target(&self, from: ReimbursementStatus) -> Option<ReimbursementStatus> {
        use ReimbursementAction::*;
        use ReimbursementStatus::*;
        match (from, self) {
            (Draft, Request) => Some(Requested),
            (Requested, Approve) => Some(Approved),
            (Requested, Reject) => Some(Rejected),
            (Approved, Pay) => Some(Paid),
            _ => None,
        }
    }
}

impl fmt::Display for ReimbursementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReimbursementAction::Request => "request",
            ReimbursementAction::Approve => "approve",
            ReimbursementAction::Reject => "reject",
            ReimbursementAction::Pay => "pay",
        };
        f.write_str(name)
    }
}

/// A request for reimbursement of relocation expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reimbursement {
    /// Unique identifier
    pub id: ReimbursementId,
    /// Amount the member asks for
    pub requested_amount: Cents,
    /// How the member will be paid
    pub method_of_receipt: MethodOfReceipt,
    /// Current status
    pub status: ReimbursementStatus,
    /// When the member submitted the request
    pub requested_date: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Reimbursement {
    /// Creates a reimbursement in `Draft` with no requested date
    pub fn build_draft(requested_amount: Cents, method_of_receipt: MethodOfReceipt) -> Self {
        let now = Utc::now();
        Self {
            id: ReimbursementId::new_v7(),
            requested_amount,
            method_of_receipt,
            status: ReimbursementStatus::Draft,
            requested_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a reimbursement already in `Requested`, stamped from the clock
    pub fn build_requested(
        requested_amount: Cents,
        method_of_receipt: MethodOfReceipt,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        Self {
            id: ReimbursementId::new_v7(),
            requested_amount,
            method_of_receipt,
            status: ReimbursementStatus::Requested,
            requested_date: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Draft -> Requested, stamping the requested date with the current time
    pub fn request(&mut self) -> Result<(), ReimbursementError> {
        self.request_with(&SystemClock)
    }

    /// Draft -> Requested, stamping the requested date from `clock`
    pub fn request_with(&mut self, clock: &dyn Clock) -> Result<(), ReimbursementError> {
        self.perform(ReimbursementAction::Request, clock)
    }

    /// Requested -> Approved
    pub fn approve(&mut self) -> Result<(), ReimbursementError> {
        self.perform(ReimbursementAction::Approve, &SystemClock)
    }

    /// Requested -> Rejected
    pub fn reject(&mut self) -> Result<(), ReimbursementError> {
        self.perform(ReimbursementAction::Reject, &SystemClock)
    }

    /// Approved -> Paid
    pub fn pay(&mut self) -> Result<(), ReimbursementError> {
        self.perform(ReimbursementAction::Pay, &SystemClock)
    }

    /// Applies `action`, leaving the record untouched when it is not legal
    pub fn perform(
        &mut self,
        action: ReimbursementAction,
        clock: &dyn Clock,
    ) -> Result<(), ReimbursementError> {
        let target = action
            .target(self.status)
            .ok_or(ReimbursementError::InvalidTransition {
                from: self.status,
                action,
            })?;

        let now = clock.now();
        if action == ReimbursementAction::Request {
            self.requested_date = Some(now);
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Actions that are legal from the current status
    pub fn permitted_actions(&self) -> Vec<ReimbursementAction> {
        ReimbursementAction::ALL
            .into_iter()
            .filter(|action| action.target(self.status).is_some())
            .collect()
    }
}

impl Validatable for Reimbursement {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        let mut rules = vec![
            FieldRule::new("ID", FieldValue::Uuid(*self.id.as_uuid())).with(Constraint::Required),
            FieldRule::new("RequestedAmount", FieldValue::Int(self.requested_amount.value()))
                .with(Constraint::GreaterThan(0)),
        ];
        if self.status != ReimbursementStatus::Draft {
            rules.push(
                FieldRule::new("RequestedDate", FieldValue::OptionalTime(self.requested_date))
                    .with(Constraint::Required),
            );
        }
        rules
    }
}
