//! FundStatus enum for savings-group funds.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, EnumOption, ErrorCode};

/// Status of a savings-group fund. Funds are never hard-deleted; removing a
/// fund flips it to Inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FundStatus {
    #[default]
    Active,
    Inactive,
}

impl FundStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, FundStatus::Active)
    }

    /// Numeric status code used by the persistence layer.
    pub fn code(&self) -> i32 {
        match self {
            FundStatus::Active => 100,
            FundStatus::Inactive => 200,
        }
    }

    /// Resolves a stored status code. Unknown codes are rejected.
    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            100 => Ok(FundStatus::Active),
            200 => Ok(FundStatus::Inactive),
            other => Err(DomainError::new(
                ErrorCode::SerializationError,
                "error.msg.sgfund.status.unknown",
                format!("Unknown fund status code {}", other),
            )),
        }
    }

    /// Read-side rendering of this status.
    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            FundStatus::Active => ("sgFundStatus.active", "Active"),
            FundStatus::Inactive => ("sgFundStatus.inactive", "Inactive"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }
}

impl fmt::Display for FundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FundStatus::Active => "Active",
            FundStatus::Inactive => "Inactive",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(FundStatus::default(), FundStatus::Active);
        assert!(FundStatus::Active.is_active());
        assert!(!FundStatus::Inactive.is_active());
    }

    #[test]
    fn codes_round_trip() {
        assert_eq!(FundStatus::from_code(100).unwrap(), FundStatus::Active);
        assert_eq!(FundStatus::from_code(200).unwrap(), FundStatus::Inactive);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(FundStatus::from_code(300).is_err());
    }
}
