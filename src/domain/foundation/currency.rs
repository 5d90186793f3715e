//! Cycle currency value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ParamError;

/// Currency configuration of a cycle: ISO-style code, decimal places, and an
/// optional rounding multiple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    code: String,
    digits: u32,
    in_multiples_of: Option<u32>,
}

impl Currency {
    pub const MAX_DIGITS: u32 = 6;

    /// Builds a currency, collecting every constraint violation.
    pub fn new(
        code: impl Into<String>,
        digits: u32,
        in_multiples_of: Option<u32>,
    ) -> Result<Self, Vec<ParamError>> {
        let code = code.into();
        let mut errors = Vec::new();

        if code.trim().is_empty() {
            errors.push(ParamError::new("currencyCode", "currencyCode cannot be blank"));
        } else if code.len() > 3 {
            errors.push(ParamError::new(
                "currencyCode",
                "currencyCode cannot exceed 3 characters",
            ));
        }
        if digits > Self::MAX_DIGITS {
            errors.push(ParamError::new(
                "currencyDigits",
                format!("currencyDigits must be between 0 and {}", Self::MAX_DIGITS),
            ));
        }

        if errors.is_empty() {
            Ok(Self {
                code,
                digits,
                in_multiples_of,
            })
        } else {
            Err(errors)
        }
    }

    /// Rebuilds a currency from trusted storage without re-validating.
    pub fn reconstitute(code: String, digits: u32, in_multiples_of: Option<u32>) -> Self {
        Self {
            code,
            digits,
            in_multiples_of,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn in_multiples_of(&self) -> Option<u32> {
        self.in_multiples_of
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
