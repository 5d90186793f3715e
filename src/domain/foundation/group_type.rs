//! Group type codes. Only savings groups run cycles and funds.

use serde::{Deserialize, Serialize};

use super::{DomainError, EnumOption, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    Regular,
    Savings,
}

impl GroupType {
    pub fn is_savings(&self) -> bool {
        matches!(self, GroupType::Savings)
    }

    pub fn code(&self) -> i32 {
        match self {
            GroupType::Regular => 1,
            GroupType::Savings => 2,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(GroupType::Regular),
            2 => Ok(GroupType::Savings),
            other => Err(DomainError::new(
                ErrorCode::SerializationError,
                "error.msg.group.type.unknown",
                format!("Unknown group type code {}", other),
            )),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            GroupType::Regular => ("groupType.Regular", "Regular Group"),
            GroupType::Savings => ("groupType.Savings", "Savings Group"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }
}
