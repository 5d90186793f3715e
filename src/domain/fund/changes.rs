//! Change-set returned by fund mutations.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{
    AmortizationMethod, ChargeId, FundStatus, InterestCalculationPeriod, InterestMethod,
    RepaymentFrequency, StrategyId,
};

use super::charge::ChargeChange;

/// The loan limit of a fund: either a multiple of a member's savings or a
/// fixed ceiling, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "basis", rename_all = "camelCase")]
pub enum LoanLimit {
    #[serde(rename_all = "camelCase")]
    BasedOnSavings { factor: u32 },
    #[serde(rename_all = "camelCase")]
    FixedAmount { amount: Decimal },
}

impl LoanLimit {
    pub fn is_based_on_savings(&self) -> bool {
        matches!(self, LoanLimit::BasedOnSavings { .. })
    }

    pub fn factor(&self) -> Option<u32> {
        match self {
            LoanLimit::BasedOnSavings { factor } => Some(*factor),
            LoanLimit::FixedAmount { .. } => None,
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            LoanLimit::BasedOnSavings { .. } => None,
            LoanLimit::FixedAmount { amount } => Some(*amount),
        }
    }
}

/// A charge-level entry in a fund change-set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum FundChargeChange {
    #[serde(rename_all = "camelCase")]
    Added { id: ChargeId },
    #[serde(rename_all = "camelCase")]
    Updated(ChargeChange),
}

/// Fields actually modified by a fund command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_deposit_per_meeting: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_deposit_per_meeting: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_limit: Option<LoanLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_nominal_interest_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_method: Option<InterestMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_calculated_in_period: Option<InterestCalculationPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repay_every: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_period_frequency: Option<RepaymentFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_repayments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_number_of_repayments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_number_of_repayments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization_method: Option<AmortizationMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_processing_strategy_id: Option<StrategyId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charges: Vec<FundChargeChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_status: Option<FundStatus>,
}

impl FundChanges {
    pub fn is_empty(&self) -> bool {
        self == &FundChanges::default()
    }
}
