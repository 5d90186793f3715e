//! Fund reader port (read side / CQRS queries).

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{ChargeId, CycleId, DomainError, EnumOption, FundId, StrategyId};

/// Reader port for fund queries.
#[async_trait]
pub trait FundReader: Send + Sync {
    /// Get a detailed fund view by ID.
    ///
    /// Returns `None` if not found.
    async fn get_by_id(&self, id: &FundId) -> Result<Option<FundView>, DomainError>;

    /// List every fund of a cycle, active and inactive.
    async fn list_by_cycle(&self, cycle_id: &CycleId) -> Result<Vec<FundView>, DomainError>;
}

/// Detailed view of a savings-group fund.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundView {
    pub id: FundId,
    pub name: String,
    pub cycle_id: CycleId,
    pub fund_status: EnumOption,
    pub minimum_deposit_per_meeting: Decimal,
    pub maximum_deposit_per_meeting: Decimal,
    pub is_loan_limit_based_on_savings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_limit_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_limit_factor: Option<u32>,
    pub total_cash_in_hand: Decimal,
    pub total_cash_in_bank: Decimal,
    pub total_deposits: Decimal,
    pub total_loan_portfolio: Decimal,
    pub total_fee_collected: Decimal,
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub loan_product: FundLoanProductView,
    pub charges: Vec<FundChargeView>,
}

/// View of the loan terms backing a fund.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundLoanProductView {
    pub annual_nominal_interest_rate: Decimal,
    pub interest_method: EnumOption,
    pub interest_calculated_in_period: EnumOption,
    pub repay_every: u32,
    pub repayment_period_frequency: EnumOption,
    pub number_of_repayments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_number_of_repayments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_number_of_repayments: Option<u32>,
    pub amortization_method: EnumOption,
    pub transaction_processing_strategy_id: StrategyId,
    pub transaction_processing_strategy_name: String,
}

/// View of one charge attached to a fund.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundChargeView {
    pub id: ChargeId,
    pub charge_applies_to: EnumOption,
    pub charge_time: EnumOption,
    pub charge_calculation: EnumOption,
    pub amount: Decimal,
    pub penalty: bool,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn FundReader) {}
    }
}
