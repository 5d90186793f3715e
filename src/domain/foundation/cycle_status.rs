//! CycleStatus enum for tracking the lifecycle of savings-group cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, EnumOption, ErrorCode};

/// Lifecycle status of a savings-group cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Initiated,
    Active,
    Closed,
}

impl CycleStatus {
    /// Returns true while funds may be configured and cycle terms edited.
    pub fn is_mutable(&self) -> bool {
        matches!(self, CycleStatus::Initiated)
    }

    /// Returns true once the cycle has been shared out and closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, CycleStatus::Closed)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Initiated -> Active
    /// - Active -> Closed
    pub fn can_transition_to(&self, target: &CycleStatus) -> bool {
        use CycleStatus::*;
        matches!((self, target), (Initiated, Active) | (Active, Closed))
    }

    /// Numeric status code used by the persistence layer.
    pub fn code(&self) -> i32 {
        match self {
            CycleStatus::Initiated => 100,
            CycleStatus::Active => 300,
            CycleStatus::Closed => 600,
        }
    }

    /// Resolves a stored status code. Unknown codes are rejected.
    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            100 => Ok(CycleStatus::Initiated),
            300 => Ok(CycleStatus::Active),
            600 => Ok(CycleStatus::Closed),
            other => Err(DomainError::new(
                ErrorCode::SerializationError,
                "error.msg.sgcycle.status.unknown",
                format!("Unknown cycle status code {}", other),
            )),
        }
    }

    /// Read-side rendering of this status.
    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            CycleStatus::Initiated => ("sgCycleStatus.initiated", "Initiated"),
            CycleStatus::Active => ("sgCycleStatus.active", "Active"),
            CycleStatus::Closed => ("sgCycleStatus.closed", "Closed"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStatus::Initiated => "Initiated",
            CycleStatus::Active => "Active",
            CycleStatus::Closed => "Closed",
        };
        write!(f, "{}", s)
    }
}
