//! Loan-product code enums used by fund loan terms.

use serde::{Deserialize, Serialize};

use super::{DomainError, EnumOption, ErrorCode};

/// Interest computation method for fund loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMethod {
    DecliningBalance,
    Flat,
}

impl InterestMethod {
    pub fn code(&self) -> i32 {
        match self {
            InterestMethod::DecliningBalance => 0,
            InterestMethod::Flat => 1,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(InterestMethod::DecliningBalance),
            1 => Ok(InterestMethod::Flat),
            other => Err(unknown_code("interest.method", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            InterestMethod::DecliningBalance => {
                ("interestType.declining.balance", "Declining Balance")
            }
            InterestMethod::Flat => ("interestType.flat", "Flat"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            InterestMethod::DecliningBalance.option(),
            InterestMethod::Flat.option(),
        ]
    }
}

/// Period over which interest is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestCalculationPeriod {
    Daily,
    SameAsRepaymentPeriod,
}

impl InterestCalculationPeriod {
    pub fn code(&self) -> i32 {
        match self {
            InterestCalculationPeriod::Daily => 0,
            InterestCalculationPeriod::SameAsRepaymentPeriod => 1,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(InterestCalculationPeriod::Daily),
            1 => Ok(InterestCalculationPeriod::SameAsRepaymentPeriod),
            other => Err(unknown_code("interest.calculation.period", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            InterestCalculationPeriod::Daily => ("interestCalculationPeriodType.daily", "Daily"),
            InterestCalculationPeriod::SameAsRepaymentPeriod => (
                "interestCalculationPeriodType.same.as.repayment.period",
                "Same as repayment period",
            ),
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            InterestCalculationPeriod::Daily.option(),
            InterestCalculationPeriod::SameAsRepaymentPeriod.option(),
        ]
    }
}

/// Unit of the repayment period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentFrequency {
    Days,
    Weeks,
    Months,
    Years,
}

impl RepaymentFrequency {
    pub fn code(&self) -> i32 {
        match self {
            RepaymentFrequency::Days => 0,
            RepaymentFrequency::Weeks => 1,
            RepaymentFrequency::Months => 2,
            RepaymentFrequency::Years => 3,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(RepaymentFrequency::Days),
            1 => Ok(RepaymentFrequency::Weeks),
            2 => Ok(RepaymentFrequency::Months),
            3 => Ok(RepaymentFrequency::Years),
            other => Err(unknown_code("repayment.period.frequency", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            RepaymentFrequency::Days => ("repaymentFrequency.periodFrequencyType.days", "Days"),
            RepaymentFrequency::Weeks => ("repaymentFrequency.periodFrequencyType.weeks", "Weeks"),
            RepaymentFrequency::Months => {
                ("repaymentFrequency.periodFrequencyType.months", "Months")
            }
            RepaymentFrequency::Years => ("repaymentFrequency.periodFrequencyType.years", "Years"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            RepaymentFrequency::Days.option(),
            RepaymentFrequency::Weeks.option(),
            RepaymentFrequency::Months.option(),
            RepaymentFrequency::Years.option(),
        ]
    }
}

/// Principal amortization method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationMethod {
    EqualPrincipal,
    EqualInstalments,
}

impl AmortizationMethod {
    pub fn code(&self) -> i32 {
        match self {
            AmortizationMethod::EqualPrincipal => 0,
            AmortizationMethod::EqualInstalments => 1,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(AmortizationMethod::EqualPrincipal),
            1 => Ok(AmortizationMethod::EqualInstalments),
            other => Err(unknown_code("amortization.method", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            AmortizationMethod::EqualPrincipal => {
                ("amortizationType.equal.principal", "Equal principal payments")
            }
            AmortizationMethod::EqualInstalments => {
                ("amortizationType.equal.installments", "Equal installments")
            }
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            AmortizationMethod::EqualPrincipal.option(),
            AmortizationMethod::EqualInstalments.option(),
        ]
    }
}

fn unknown_code(what: &str, code: i32) -> DomainError {
    DomainError::new(
        ErrorCode::SerializationError,
        format!("error.msg.sgfund.{}.unknown", what),
        format!("Unknown {} code {}", what, code),
    )
}
