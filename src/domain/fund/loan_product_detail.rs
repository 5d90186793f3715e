//! Loan terms backing a savings-group fund.

use rust_decimal::Decimal;

use crate::domain::foundation::{
    AmortizationMethod, InterestCalculationPeriod, InterestMethod, RepaymentFrequency, StrategyId,
};

/// Fully-validated loan terms for a new fund.
#[derive(Debug, Clone)]
pub struct NewLoanProductTerms {
    pub annual_nominal_interest_rate: Decimal,
    pub interest_method: InterestMethod,
    pub interest_calculated_in_period: InterestCalculationPeriod,
    pub repay_every: u32,
    pub repayment_frequency: RepaymentFrequency,
    pub number_of_repayments: u32,
    pub min_number_of_repayments: Option<u32>,
    pub max_number_of_repayments: Option<u32>,
    pub amortization_method: AmortizationMethod,
    pub transaction_processing_strategy_id: StrategyId,
}

/// Loan-product terms of a fund. Loans issued from the fund follow these
/// terms; the fund does not provision a standalone loan product.
#[derive(Debug, Clone, PartialEq)]
pub struct FundLoanProductDetail {
    annual_nominal_interest_rate: Decimal,
    interest_method: InterestMethod,
    interest_calculated_in_period: InterestCalculationPeriod,
    repay_every: u32,
    repayment_frequency: RepaymentFrequency,
    number_of_repayments: u32,
    min_number_of_repayments: Option<u32>,
    max_number_of_repayments: Option<u32>,
    amortization_method: AmortizationMethod,
    transaction_processing_strategy_id: StrategyId,
}

impl FundLoanProductDetail {
    pub fn new(terms: NewLoanProductTerms) -> Self {
        Self {
            annual_nominal_interest_rate: terms.annual_nominal_interest_rate,
            interest_method: terms.interest_method,
            interest_calculated_in_period: terms.interest_calculated_in_period,
            repay_every: terms.repay_every,
            repayment_frequency: terms.repayment_frequency,
            number_of_repayments: terms.number_of_repayments,
            min_number_of_repayments: terms.min_number_of_repayments,
            max_number_of_repayments: terms.max_number_of_repayments,
            amortization_method: terms.amortization_method,
            transaction_processing_strategy_id: terms.transaction_processing_strategy_id,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        annual_nominal_interest_rate: Decimal,
        interest_method: InterestMethod,
        interest_calculated_in_period: InterestCalculationPeriod,
        repay_every: u32,
        repayment_frequency: RepaymentFrequency,
        number_of_repayments: u32,
        min_number_of_repayments: Option<u32>,
        max_number_of_repayments: Option<u32>,
        amortization_method: AmortizationMethod,
        transaction_processing_strategy_id: StrategyId,
    ) -> Self {
        Self {
            annual_nominal_interest_rate,
            interest_method,
            interest_calculated_in_period,
            repay_every,
            repayment_frequency,
            number_of_repayments,
            min_number_of_repayments,
            max_number_of_repayments,
            amortization_method,
            transaction_processing_strategy_id,
        }
    }

    pub fn annual_nominal_interest_rate(&self) -> Decimal {
        self.annual_nominal_interest_rate
    }

    pub fn interest_method(&self) -> InterestMethod {
        self.interest_method
    }

    pub fn interest_calculated_in_period(&self) -> InterestCalculationPeriod {
        self.interest_calculated_in_period
    }

    pub fn repay_every(&self) -> u32 {
        self.repay_every
    }

    pub fn repayment_frequency(&self) -> RepaymentFrequency {
        self.repayment_frequency
    }

    pub fn number_of_repayments(&self) -> u32 {
        self.number_of_repayments
    }

    pub fn min_number_of_repayments(&self) -> Option<u32> {
        self.min_number_of_repayments
    }

    pub fn max_number_of_repayments(&self) -> Option<u32> {
        self.max_number_of_repayments
    }

    pub fn amortization_method(&self) -> AmortizationMethod {
        self.amortization_method
    }

    pub fn transaction_processing_strategy_id(&self) -> StrategyId {
        self.transaction_processing_strategy_id
    }

    pub(super) fn set_annual_nominal_interest_rate(&mut self, rate: Decimal) {
        self.annual_nominal_interest_rate = rate;
    }

    pub(super) fn set_interest_method(&mut self, method: InterestMethod) {
        self.interest_method = method;
    }

    pub(super) fn set_interest_calculated_in_period(&mut self, period: InterestCalculationPeriod) {
        self.interest_calculated_in_period = period;
    }

    pub(super) fn set_repay_every(&mut self, repay_every: u32) {
        self.repay_every = repay_every;
    }

    pub(super) fn set_repayment_frequency(&mut self, frequency: RepaymentFrequency) {
        self.repayment_frequency = frequency;
    }

    pub(super) fn set_number_of_repayments(&mut self, n: u32) {
        self.number_of_repayments = n;
    }

    pub(super) fn set_min_number_of_repayments(&mut self, n: u32) {
        self.min_number_of_repayments = Some(n);
    }

    pub(super) fn set_max_number_of_repayments(&mut self, n: u32) {
        self.max_number_of_repayments = Some(n);
    }

    pub(super) fn set_amortization_method(&mut self, method: AmortizationMethod) {
        self.amortization_method = method;
    }

    pub(super) fn set_transaction_processing_strategy_id(&mut self, id: StrategyId) {
        self.transaction_processing_strategy_id = id;
    }
}
