//! SavingsGroupFund aggregate - a named pool of money inside a cycle.
//!
//! Funds carry deposit rules, a loan limit, loan-product terms, and charge
//! definitions. They are configured while the owning cycle is Initiated and
//! soft-deleted by flipping to Inactive.

use rust_decimal::Decimal;

use crate::domain::foundation::{
    CycleId, DomainError, ErrorCode, FundId, FundStatus, GroupId,
};

use super::charge::FundCharge;
use super::changes::{FundChanges, FundChargeChange, LoanLimit};
use super::loan_product_detail::FundLoanProductDetail;
use super::validator::{FundUpdate, NewFundTerms};

/// The SavingsGroupFund aggregate root.
#[derive(Debug, Clone)]
pub struct SavingsGroupFund {
    id: FundId,
    name: String,
    group_id: GroupId,
    cycle_id: CycleId,
    status: FundStatus,
    minimum_deposit_per_meeting: Decimal,
    maximum_deposit_per_meeting: Decimal,
    loan_limit: LoanLimit,
    total_cash_in_hand: Decimal,
    total_cash_in_bank: Decimal,
    total_deposits: Decimal,
    total_loan_portfolio: Decimal,
    total_fee_collected: Decimal,
    total_expenses: Decimal,
    total_income: Decimal,
    loan_product_detail: FundLoanProductDetail,
    charges: Vec<FundCharge>,
}

impl SavingsGroupFund {
    /// Creates a new Active fund with zeroed running totals.
    pub fn new(group_id: GroupId, cycle_id: CycleId, terms: NewFundTerms) -> Self {
        let charges = terms.charges.into_iter().map(FundCharge::new).collect();
        Self {
            id: FundId::new(),
            name: terms.name,
            group_id,
            cycle_id,
            status: FundStatus::Active,
            minimum_deposit_per_meeting: terms.minimum_deposit_per_meeting,
            maximum_deposit_per_meeting: terms.maximum_deposit_per_meeting,
            loan_limit: terms.loan_limit,
            total_cash_in_hand: Decimal::ZERO,
            total_cash_in_bank: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            total_loan_portfolio: Decimal::ZERO,
            total_fee_collected: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            total_income: Decimal::ZERO,
            loan_product_detail: FundLoanProductDetail::new(terms.loan_product),
            charges,
        }
    }

    /// Reconstitutes a fund from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: FundId,
        name: String,
        group_id: GroupId,
        cycle_id: CycleId,
        status: FundStatus,
        minimum_deposit_per_meeting: Decimal,
        maximum_deposit_per_meeting: Decimal,
        loan_limit: LoanLimit,
        totals: FundTotals,
        loan_product_detail: FundLoanProductDetail,
        charges: Vec<FundCharge>,
    ) -> Self {
        Self {
            id,
            name,
            group_id,
            cycle_id,
            status,
            minimum_deposit_per_meeting,
            maximum_deposit_per_meeting,
            loan_limit,
            total_cash_in_hand: totals.cash_in_hand,
            total_cash_in_bank: totals.cash_in_bank,
            total_deposits: totals.deposits,
            total_loan_portfolio: totals.loan_portfolio,
            total_fee_collected: totals.fee_collected,
            total_expenses: totals.expenses,
            total_income: totals.income,
            loan_product_detail,
            charges,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> FundId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn status(&self) -> FundStatus {
        self.status
    }

    pub fn minimum_deposit_per_meeting(&self) -> Decimal {
        self.minimum_deposit_per_meeting
    }

    pub fn maximum_deposit_per_meeting(&self) -> Decimal {
        self.maximum_deposit_per_meeting
    }

    pub fn loan_limit(&self) -> LoanLimit {
        self.loan_limit
    }

    pub fn totals(&self) -> FundTotals {
        FundTotals {
            cash_in_hand: self.total_cash_in_hand,
            cash_in_bank: self.total_cash_in_bank,
            deposits: self.total_deposits,
            loan_portfolio: self.total_loan_portfolio,
            fee_collected: self.total_fee_collected,
            expenses: self.total_expenses,
            income: self.total_income,
        }
    }

    pub fn loan_product_detail(&self) -> &FundLoanProductDetail {
        &self.loan_product_detail
    }

    pub fn charges(&self) -> &[FundCharge] {
        &self.charges
    }

    /// Charges currently in force.
    pub fn active_charges(&self) -> impl Iterator<Item = &FundCharge> {
        self.charges.iter().filter(|c| c.is_active())
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Applies a validated update. Only fields that actually change land in
    /// the returned change-set; charge patches are keyed by charge id.
    pub fn apply_update(&mut self, update: FundUpdate) -> Result<FundChanges, DomainError> {
        self.validate_is_active()?;

        let mut changes = FundChanges::default();

        if let Some(ref name) = update.name {
            if *name != self.name {
                self.name = name.clone();
                changes.name = Some(name.clone());
            }
        }
        if let Some(min) = update.minimum_deposit_per_meeting {
            if min != self.minimum_deposit_per_meeting {
                self.minimum_deposit_per_meeting = min;
                changes.minimum_deposit_per_meeting = Some(min);
            }
        }
        if let Some(max) = update.maximum_deposit_per_meeting {
            if max != self.maximum_deposit_per_meeting {
                self.maximum_deposit_per_meeting = max;
                changes.maximum_deposit_per_meeting = Some(max);
            }
        }
        if let Some(limit) = update.loan_limit {
            if limit != self.loan_limit {
                self.loan_limit = limit;
                changes.loan_limit = Some(limit);
            }
        }

        self.apply_loan_product_update(&update, &mut changes);

        for patch in update.charge_patches {
            let charge = self
                .charges
                .iter_mut()
                .find(|c| c.id() == patch.id)
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::ChargeNotFound,
                        "fund.charge.not.found",
                        format!("Fund has no charge with id {}", patch.id),
                    )
                })?;
            if let Some(change) = charge.patch(patch.amount, patch.active) {
                changes.charges.push(FundChargeChange::Updated(change));
            }
        }
        for def in update.new_charges {
            let charge = FundCharge::new(def);
            changes
                .charges
                .push(FundChargeChange::Added { id: charge.id() });
            self.charges.push(charge);
        }

        Ok(changes)
    }

    /// Soft-deletes the fund.
    pub fn deactivate(&mut self) -> Result<FundChanges, DomainError> {
        self.validate_is_active()?;
        self.status = FundStatus::Inactive;
        Ok(FundChanges {
            fund_status: Some(FundStatus::Inactive),
            ..Default::default()
        })
    }

    /// Clones this fund into a destination cycle: fresh ids, same terms,
    /// zeroed totals, and only the charges still in force.
    pub fn copy_for_cycle(&self, destination: CycleId) -> SavingsGroupFund {
        SavingsGroupFund {
            id: FundId::new(),
            name: self.name.clone(),
            group_id: self.group_id,
            cycle_id: destination,
            status: FundStatus::Active,
            minimum_deposit_per_meeting: self.minimum_deposit_per_meeting,
            maximum_deposit_per_meeting: self.maximum_deposit_per_meeting,
            loan_limit: self.loan_limit,
            total_cash_in_hand: Decimal::ZERO,
            total_cash_in_bank: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            total_loan_portfolio: Decimal::ZERO,
            total_fee_collected: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            total_income: Decimal::ZERO,
            loan_product_detail: self.loan_product_detail.clone(),
            charges: self.active_charges().map(|c| c.copy()).collect(),
        }
    }

    fn apply_loan_product_update(&mut self, update: &FundUpdate, changes: &mut FundChanges) {
        let detail = &mut self.loan_product_detail;

        if let Some(rate) = update.annual_nominal_interest_rate {
            if rate != detail.annual_nominal_interest_rate() {
                detail.set_annual_nominal_interest_rate(rate);
                changes.annual_nominal_interest_rate = Some(rate);
            }
        }
        if let Some(method) = update.interest_method {
            if method != detail.interest_method() {
                detail.set_interest_method(method);
                changes.interest_method = Some(method);
            }
        }
        if let Some(period) = update.interest_calculated_in_period {
            if period != detail.interest_calculated_in_period() {
                detail.set_interest_calculated_in_period(period);
                changes.interest_calculated_in_period = Some(period);
            }
        }
        if let Some(repay_every) = update.repay_every {
            if repay_every != detail.repay_every() {
                detail.set_repay_every(repay_every);
                changes.repay_every = Some(repay_every);
            }
        }
        if let Some(frequency) = update.repayment_frequency {
            if frequency != detail.repayment_frequency() {
                detail.set_repayment_frequency(frequency);
                changes.repayment_period_frequency = Some(frequency);
            }
        }
        if let Some(n) = update.number_of_repayments {
            if n != detail.number_of_repayments() {
                detail.set_number_of_repayments(n);
                changes.number_of_repayments = Some(n);
            }
        }
        if let Some(n) = update.min_number_of_repayments {
            if Some(n) != detail.min_number_of_repayments() {
                detail.set_min_number_of_repayments(n);
                changes.min_number_of_repayments = Some(n);
            }
        }
        if let Some(n) = update.max_number_of_repayments {
            if Some(n) != detail.max_number_of_repayments() {
                detail.set_max_number_of_repayments(n);
                changes.max_number_of_repayments = Some(n);
            }
        }
        if let Some(method) = update.amortization_method {
            if method != detail.amortization_method() {
                detail.set_amortization_method(method);
                changes.amortization_method = Some(method);
            }
        }
        if let Some(strategy_id) = update.transaction_processing_strategy_id {
            if strategy_id != detail.transaction_processing_strategy_id() {
                detail.set_transaction_processing_strategy_id(strategy_id);
                changes.transaction_processing_strategy_id = Some(strategy_id);
            }
        }
    }

    fn validate_is_active(&self) -> Result<(), DomainError> {
        if !self.status.is_active() {
            return Err(DomainError::invalid_state(
                "fund.is.not.active",
                "An inactive fund cannot be modified",
            ));
        }
        Ok(())
    }
}

/// Running totals of a fund, grouped to keep constructor signatures sane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundTotals {
    pub cash_in_hand: Decimal,
    pub cash_in_bank: Decimal,
    pub deposits: Decimal,
    pub loan_portfolio: Decimal,
    pub fee_collected: Decimal,
    pub expenses: Decimal,
    pub income: Decimal,
}

impl FundTotals {
    pub fn zero() -> Self {
        Self {
            cash_in_hand: Decimal::ZERO,
            cash_in_bank: Decimal::ZERO,
            deposits: Decimal::ZERO,
            loan_portfolio: Decimal::ZERO,
            fee_collected: Decimal::ZERO,
            expenses: Decimal::ZERO,
            income: Decimal::ZERO,
        }
    }
}
