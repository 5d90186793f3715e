//! Charge code enums and their valid combinations.

use serde::{Deserialize, Serialize};

use super::{DomainError, EnumOption, ErrorCode};

/// What a fund charge applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeAppliesTo {
    Loan,
    SavingsGroup,
}

impl ChargeAppliesTo {
    pub fn code(&self) -> i32 {
        match self {
            ChargeAppliesTo::Loan => 1,
            ChargeAppliesTo::SavingsGroup => 101,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(ChargeAppliesTo::Loan),
            101 => Ok(ChargeAppliesTo::SavingsGroup),
            other => Err(unknown_code("charge.applies.to", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            ChargeAppliesTo::Loan => ("chargeAppliesTo.loan", "Loan"),
            ChargeAppliesTo::SavingsGroup => ("chargeAppliesTo.savingsGroup", "Savings Group"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            ChargeAppliesTo::Loan.option(),
            ChargeAppliesTo::SavingsGroup.option(),
        ]
    }

    /// Charge times permitted for this target.
    pub fn allows_time(&self, time: ChargeTime) -> bool {
        match self {
            ChargeAppliesTo::Loan => matches!(
                time,
                ChargeTime::Disbursement | ChargeTime::InstalmentFee | ChargeTime::OverdueInstalment
            ),
            ChargeAppliesTo::SavingsGroup => matches!(
                time,
                ChargeTime::MeetingAbsence | ChargeTime::PartialDeposit
            ),
        }
    }

    /// Charge calculations permitted for this target.
    pub fn allows_calculation(&self, calculation: ChargeCalculation) -> bool {
        match self {
            ChargeAppliesTo::Loan => true,
            ChargeAppliesTo::SavingsGroup => matches!(
                calculation,
                ChargeCalculation::Flat | ChargeCalculation::PercentOfAmount
            ),
        }
    }
}

/// When a fund charge is levied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeTime {
    Disbursement,
    InstalmentFee,
    OverdueInstalment,
    MeetingAbsence,
    PartialDeposit,
}

impl ChargeTime {
    pub fn code(&self) -> i32 {
        match self {
            ChargeTime::Disbursement => 1,
            ChargeTime::InstalmentFee => 8,
            ChargeTime::OverdueInstalment => 9,
            ChargeTime::MeetingAbsence => 101,
            ChargeTime::PartialDeposit => 102,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(ChargeTime::Disbursement),
            8 => Ok(ChargeTime::InstalmentFee),
            9 => Ok(ChargeTime::OverdueInstalment),
            101 => Ok(ChargeTime::MeetingAbsence),
            102 => Ok(ChargeTime::PartialDeposit),
            other => Err(unknown_code("charge.time", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            ChargeTime::Disbursement => ("chargeTimeType.disbursement", "Disbursement"),
            ChargeTime::InstalmentFee => ("chargeTimeType.instalmentFee", "Instalment Fee"),
            ChargeTime::OverdueInstalment => {
                ("chargeTimeType.overdueInstallment", "Overdue Instalment")
            }
            ChargeTime::MeetingAbsence => ("chargeTimeType.meetingAbsense", "Meeting Absence"),
            ChargeTime::PartialDeposit => ("chargeTimeType.partialDeposit", "Partial Deposit"),
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            ChargeTime::Disbursement.option(),
            ChargeTime::InstalmentFee.option(),
            ChargeTime::OverdueInstalment.option(),
            ChargeTime::MeetingAbsence.option(),
            ChargeTime::PartialDeposit.option(),
        ]
    }
}

/// How a fund charge amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCalculation {
    Flat,
    PercentOfAmount,
    PercentOfAmountAndInterest,
    PercentOfInterest,
    PercentOfDisbursementAmount,
}

impl ChargeCalculation {
    pub fn code(&self) -> i32 {
        match self {
            ChargeCalculation::Flat => 1,
            ChargeCalculation::PercentOfAmount => 2,
            ChargeCalculation::PercentOfAmountAndInterest => 3,
            ChargeCalculation::PercentOfInterest => 4,
            ChargeCalculation::PercentOfDisbursementAmount => 5,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(ChargeCalculation::Flat),
            2 => Ok(ChargeCalculation::PercentOfAmount),
            3 => Ok(ChargeCalculation::PercentOfAmountAndInterest),
            4 => Ok(ChargeCalculation::PercentOfInterest),
            5 => Ok(ChargeCalculation::PercentOfDisbursementAmount),
            other => Err(unknown_code("charge.calculation", other)),
        }
    }

    pub fn option(&self) -> EnumOption {
        let (code, description) = match self {
            ChargeCalculation::Flat => ("chargeCalculationType.flat", "Flat"),
            ChargeCalculation::PercentOfAmount => {
                ("chargeCalculationType.percent.of.amount", "% Amount")
            }
            ChargeCalculation::PercentOfAmountAndInterest => (
                "chargeCalculationType.percent.of.amount.and.interest",
                "% Loan Amount + Interest",
            ),
            ChargeCalculation::PercentOfInterest => {
                ("chargeCalculationType.percent.of.interest", "% Interest")
            }
            ChargeCalculation::PercentOfDisbursementAmount => (
                "chargeCalculationType.percent.of.disbursement.amount",
                "% Disbursement Amount",
            ),
        };
        EnumOption::new(self.code() as i64, code, description)
    }

    pub fn options() -> Vec<EnumOption> {
        vec![
            ChargeCalculation::Flat.option(),
            ChargeCalculation::PercentOfAmount.option(),
            ChargeCalculation::PercentOfAmountAndInterest.option(),
            ChargeCalculation::PercentOfInterest.option(),
            ChargeCalculation::PercentOfDisbursementAmount.option(),
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
