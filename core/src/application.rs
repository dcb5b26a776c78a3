//! Application record and its status machine.
//!
//!   Idle ──submit──▶ Pending ──resolve──▶ Approved | Rejected
//!
//! Approved and Rejected are terminal.

use crate::{
    error::{DecisionError, DecisionResult},
    request::LoanRequest,
    types::{ApplicationId, Millis},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Idle,
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Pending)
                | (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle     => "idle",
            Self::Pending  => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only outcomes a resolution may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for ApplicationStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id:           ApplicationId,
    /// Engine-wide submission order, strictly increasing.
    pub sequence:     u64,
    /// Session time at submission.
    pub submitted_at: Millis,
    request:          LoanRequest,
    status:           ApplicationStatus,
}

impl Application {
    /// A fresh application in `Idle`.
    pub fn new(id: ApplicationId, sequence: u64, submitted_at: Millis, request: LoanRequest) -> Self {
        Self {
            id,
            sequence,
            submitted_at,
            request,
            status: ApplicationStatus::Idle,
        }
    }

    /// The submitted form. Immutable once created.
    pub fn request(&self) -> &LoanRequest {
        &self.request
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Apply one legal transition; anything else is refused.
    pub fn transition(&mut self, next: ApplicationStatus) -> DecisionResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DecisionError::InvalidTransition {
                id:   self.id,
                from: self.status.to_string(),
                to:   next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}
