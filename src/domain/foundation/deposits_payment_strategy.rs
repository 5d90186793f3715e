//! Deposits-payment strategy codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, EnumOption, ErrorCode};

/// Order in which a member's meeting payment is applied across charges due,
/// loan dues, and deposits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositsPaymentStrategy {
    ChargesLoansDeposits,
    ChargesDepositsLoans,
    DepositsLoansCharges,
    DepositsChargesLoans,
    LoansDepositsCharges,
    LoansChargesDeposits,
}

impl DepositsPaymentStrategy {
    pub const ALL: [DepositsPaymentStrategy; 6] = [
        DepositsPaymentStrategy::ChargesLoansDeposits,
        DepositsPaymentStrategy::ChargesDepositsLoans,
        DepositsPaymentStrategy::DepositsLoansCharges,
        DepositsPaymentStrategy::DepositsChargesLoans,
        DepositsPaymentStrategy::LoansDepositsCharges,
        DepositsPaymentStrategy::LoansChargesDeposits,
    ];

    /// Numeric strategy code as accepted on the wire and stored.
    pub fn code(&self) -> i32 {
        match self {
            DepositsPaymentStrategy::ChargesLoansDeposits => 1,
            DepositsPaymentStrategy::ChargesDepositsLoans => 2,
            DepositsPaymentStrategy::DepositsLoansCharges => 3,
            DepositsPaymentStrategy::DepositsChargesLoans => 4,
            DepositsPaymentStrategy::LoansDepositsCharges => 5,
            DepositsPaymentStrategy::LoansChargesDeposits => 6,
        }
    }

    /// Resolves a strategy code. Codes outside 1..=6 are rejected.
    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(DepositsPaymentStrategy::ChargesLoansDeposits),
            2 => Ok(DepositsPaymentStrategy::ChargesDepositsLoans),
            3 => Ok(DepositsPaymentStrategy::DepositsLoansCharges),
            4 => Ok(DepositsPaymentStrategy::DepositsChargesLoans),
            5 => Ok(DepositsPaymentStrategy::LoansDepositsCharges),
            6 => Ok(DepositsPaymentStrategy::LoansChargesDeposits),
            other => Err(DomainError::new(
                ErrorCode::SerializationError,
                "error.msg.sgcycle.deposits.payment.strategy.unknown",
                format!("Unknown deposits payment strategy code {}", other),
            )),
        }
    }

    /// Read-side rendering of this strategy.
    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            DepositsPaymentStrategy::ChargesLoansDeposits => {
                ("sgDepositsPaymentStrategy.cld", "Charges, Loans, Deposits")
            }
            DepositsPaymentStrategy::ChargesDepositsLoans => {
                ("sgDepositsPaymentStrategy.cdl", "Charges, Deposits, Loans")
            }
            DepositsPaymentStrategy::DepositsLoansCharges => {
                ("sgDepositsPaymentStrategy.dlc", "Deposits, Loans, Charges")
            }
            DepositsPaymentStrategy::DepositsChargesLoans => {
                ("sgDepositsPaymentStrategy.dcl", "Deposits, Charges, Loans")
            }
            DepositsPaymentStrategy::LoansDepositsCharges => {
                ("sgDepositsPaymentStrategy.ldc", "Loans, Deposits, Charges")
            }
            DepositsPaymentStrategy::LoansChargesDeposits => {
                ("sgDepositsPaymentStrategy.lcd", "Loans, Charges, Deposits")
            }
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    /// Template options for every supported strategy.
    pub fn options() -> Vec<EnumOption> {
        Self::ALL.iter().map(|s| s.option()).collect()
    }
}

impl fmt::Display for DepositsPaymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.option().description)
    }
}
