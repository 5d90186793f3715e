//! In-memory port implementations and fixture builders for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::calendar::{MeetingFrequency, MeetingRecurrence};
use crate::domain::cycle::{NewCycleTerms, SavingsGroupCycle};
use crate::domain::foundation::{
    AmortizationMethod, Currency, CycleId, DepositsPaymentStrategy, DomainError, ErrorCode, FundId,
    GroupId, GroupType, InterestCalculationPeriod, InterestMethod, RepaymentFrequency, StrategyId,
};
use crate::domain::foundation::CycleStatus;
use crate::domain::fund::{LoanLimit, NewFundTerms, NewLoanProductTerms, SavingsGroupFund};
use crate::ports::{
    CurrencyOption, CurrencyRepository, CycleReader, CycleRepository, CycleView,
    FundLoanProductView, FundReader, FundRepository, FundView, GroupRecord, GroupRepository,
    MeetingCalendar, StrategyRepository, TransactionProcessingStrategy,
};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

/// A savings group activated on 2026-01-01.
pub(crate) fn savings_group(id: GroupId) -> GroupRecord {
    GroupRecord {
        id,
        group_type: GroupType::Savings,
        activation_date: date(2026, 1, 1),
    }
}

/// A weekly schedule meeting every Monday from 2026-01-05.
pub(crate) fn weekly_mondays() -> MeetingRecurrence {
    MeetingRecurrence::new(date(2026, 1, 5), MeetingFrequency::Weekly, 1).unwrap()
}

pub(crate) fn cycle_terms(start: NaiveDate, end: NaiveDate) -> NewCycleTerms {
    NewCycleTerms {
        currency: Currency::reconstitute("KES".to_string(), 2, None),
        start_date: start,
        end_date: end,
        is_share_based: false,
        unit_price_of_share: Decimal::ONE,
        is_client_additions_allowed_in_active_cycle: true,
        is_client_exit_allowed_in_active_cycle: true,
        does_individual_client_exit_forfeit_gains: false,
        deposits_payment_strategy: DepositsPaymentStrategy::ChargesLoansDeposits,
    }
}

/// An Initiated cycle running over four Mondays.
pub(crate) fn initiated_cycle(group_id: GroupId) -> SavingsGroupCycle {
    SavingsGroupCycle::new(
        group_id,
        1,
        cycle_terms(date(2026, 1, 5), date(2026, 1, 26)),
        4,
    )
}

pub(crate) fn active_cycle(group_id: GroupId) -> SavingsGroupCycle {
    let mut cycle = initiated_cycle(group_id);
    cycle.activate(date(2026, 1, 5)).unwrap();
    cycle
}

pub(crate) fn closed_cycle(group_id: GroupId) -> SavingsGroupCycle {
    let mut cycle = active_cycle(group_id);
    cycle.close(date(2026, 1, 26)).unwrap();
    cycle
}

/// A read-side view of an active first cycle.
pub(crate) fn cycle_view(group_id: GroupId) -> CycleView {
    CycleView {
        id: CycleId::new(),
        group_id,
        cycle_number: 1,
        status: CycleStatus::Active.option(),
        currency_code: "KES".to_string(),
        currency_digits: 2,
        currency_multiples_of: None,
        expected_start_date: date(2026, 1, 5),
        actual_start_date: Some(date(2026, 1, 5)),
        expected_end_date: date(2026, 1, 26),
        actual_end_date: None,
        expected_num_of_meetings: 4,
        num_of_meetings_completed: 0,
        num_of_meetings_pending: 4,
        is_share_based: false,
        unit_price_of_share: Decimal::ONE,
        is_client_additions_allowed_in_active_cycle: true,
        is_client_exit_allowed_in_active_cycle: true,
        does_individual_client_exit_forfeit_gains: false,
        deposits_payment_strategy: DepositsPaymentStrategy::ChargesLoansDeposits.option(),
    }
}

pub(crate) fn fund_terms(strategy_id: StrategyId) -> NewFundTerms {
    NewFundTerms {
        name: "Main fund".to_string(),
        minimum_deposit_per_meeting: dec("100"),
        maximum_deposit_per_meeting: dec("500"),
        loan_limit: LoanLimit::BasedOnSavings { factor: 3 },
        loan_product: NewLoanProductTerms {
            annual_nominal_interest_rate: dec("24"),
            interest_method: InterestMethod::Flat,
            interest_calculated_in_period: InterestCalculationPeriod::SameAsRepaymentPeriod,
            repay_every: 1,
            repayment_frequency: RepaymentFrequency::Weeks,
            number_of_repayments: 12,
            min_number_of_repayments: None,
            max_number_of_repayments: None,
            amortization_method: AmortizationMethod::EqualInstalments,
            transaction_processing_strategy_id: strategy_id,
        },
        charges: Vec::new(),
    }
}

/// A read-side view of an active fund with no charges.
pub(crate) fn fund_view(cycle_id: CycleId, strategy_id: StrategyId) -> FundView {
    FundView {
        id: FundId::new(),
        name: "Main fund".to_string(),
        cycle_id,
        fund_status: crate::domain::foundation::FundStatus::Active.option(),
        minimum_deposit_per_meeting: dec("100"),
        maximum_deposit_per_meeting: dec("500"),
        is_loan_limit_based_on_savings: true,
        loan_limit_amount: None,
        loan_limit_factor: Some(3),
        total_cash_in_hand: Decimal::ZERO,
        total_cash_in_bank: Decimal::ZERO,
        total_deposits: Decimal::ZERO,
        total_loan_portfolio: Decimal::ZERO,
        total_fee_collected: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        total_income: Decimal::ZERO,
        loan_product: FundLoanProductView {
            annual_nominal_interest_rate: dec("24"),
            interest_method: InterestMethod::Flat.option(),
            interest_calculated_in_period: InterestCalculationPeriod::SameAsRepaymentPeriod
                .option(),
            repay_every: 1,
            repayment_period_frequency: RepaymentFrequency::Weeks.option(),
            number_of_repayments: 12,
            min_number_of_repayments: None,
            max_number_of_repayments: None,
            amortization_method: AmortizationMethod::EqualInstalments.option(),
            transaction_processing_strategy_id: strategy_id,
            transaction_processing_strategy_name: "Penalties, Fees, Interest, Principal order"
                .to_string(),
        },
        charges: Vec::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Mock implementations
// ─────────────────────────────────────────────────────────────────────

pub(crate) struct MockGroupRepository {
    groups: Vec<GroupRecord>,
}

impl MockGroupRepository {
    pub(crate) fn with(group: GroupRecord) -> Self {
        Self {
            groups: vec![group],
        }
    }

    pub(crate) fn empty() -> Self {
        Self { groups: Vec::new() }
    }
}

#[async_trait]
impl GroupRepository for MockGroupRepository {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<GroupRecord>, DomainError> {
        Ok(self.groups.iter().find(|g| g.id == *id).cloned())
    }
}

pub(crate) struct MockCycleRepository {
    cycles: Mutex<Vec<SavingsGroupCycle>>,
    fail_save: bool,
}

impl MockCycleRepository {
    pub(crate) fn new() -> Self {
        Self {
            cycles: Mutex::new(Vec::new()),
            fail_save: false,
        }
    }

    pub(crate) fn with(cycle: SavingsGroupCycle) -> Self {
        Self {
            cycles: Mutex::new(vec![cycle]),
            fail_save: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            cycles: Mutex::new(Vec::new()),
            fail_save: true,
        }
    }

    pub(crate) fn stored(&self) -> Vec<SavingsGroupCycle> {
        self.cycles.lock().unwrap().clone()
    }
}

#[async_trait]
impl CycleRepository for MockCycleRepository {
    async fn save(&self, cycle: &SavingsGroupCycle) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::database("Simulated save failure"));
        }
        self.cycles.lock().unwrap().push(cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &SavingsGroupCycle) -> Result<(), DomainError> {
        let mut cycles = self.cycles.lock().unwrap();
        match cycles.iter_mut().find(|c| c.id() == cycle.id()) {
            Some(stored) => {
                *stored = cycle.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::CycleNotFound,
                "cycle.not.found",
                "Cycle not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<SavingsGroupCycle>, DomainError> {
        Ok(self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == *id)
            .cloned())
    }

    async fn find_latest_by_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<SavingsGroupCycle>, DomainError> {
        Ok(self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.group_id() == *group_id)
            .max_by_key(|c| c.cycle_number())
            .cloned())
    }
}

pub(crate) struct MockFundRepository {
    funds: Mutex<Vec<SavingsGroupFund>>,
}

impl MockFundRepository {
    pub(crate) fn new() -> Self {
        Self {
            funds: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with(fund: SavingsGroupFund) -> Self {
        Self {
            funds: Mutex::new(vec![fund]),
        }
    }

    pub(crate) fn stored(&self) -> Vec<SavingsGroupFund> {
        self.funds.lock().unwrap().clone()
    }
}

#[async_trait]
impl FundRepository for MockFundRepository {
    async fn save(&self, fund: &SavingsGroupFund) -> Result<(), DomainError> {
        self.funds.lock().unwrap().push(fund.clone());
        Ok(())
    }

    async fn update(&self, fund: &SavingsGroupFund) -> Result<(), DomainError> {
        let mut funds = self.funds.lock().unwrap();
        match funds.iter_mut().find(|f| f.id() == fund.id()) {
            Some(stored) => {
                *stored = fund.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::FundNotFound,
                "fund.not.found",
                "Fund not found",
            )),
        }
    }

    async fn save_all(&self, funds: &[SavingsGroupFund]) -> Result<(), DomainError> {
        self.funds.lock().unwrap().extend_from_slice(funds);
        Ok(())
    }

    async fn find_by_id(&self, id: &FundId) -> Result<Option<SavingsGroupFund>, DomainError> {
        Ok(self
            .funds
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id() == *id)
            .cloned())
    }

    async fn list_by_cycle(
        &self,
        cycle_id: &CycleId,
    ) -> Result<Vec<SavingsGroupFund>, DomainError> {
        Ok(self
            .funds
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.cycle_id() == *cycle_id)
            .cloned()
            .collect())
    }

    async fn find_active_by_cycle(
        &self,
        cycle_id: &CycleId,
    ) -> Result<Vec<SavingsGroupFund>, DomainError> {
        Ok(self
            .funds
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.cycle_id() == *cycle_id && f.status().is_active())
            .cloned()
            .collect())
    }
}

pub(crate) struct MockCurrencyRepository {
    currencies: Vec<CurrencyOption>,
}

impl MockCurrencyRepository {
    pub(crate) fn kes_and_ugx() -> Self {
        Self {
            currencies: vec![
                CurrencyOption {
                    code: "KES".to_string(),
                    name: "Kenyan Shilling".to_string(),
                    decimal_places: 2,
                },
                CurrencyOption {
                    code: "UGX".to_string(),
                    name: "Ugandan Shilling".to_string(),
                    decimal_places: 0,
                },
            ],
        }
    }
}

#[async_trait]
impl CurrencyRepository for MockCurrencyRepository {
    async fn list_allowed(&self) -> Result<Vec<CurrencyOption>, DomainError> {
        Ok(self.currencies.clone())
    }
}

pub(crate) struct MockCycleReader {
    views: Vec<CycleView>,
}

impl MockCycleReader {
    pub(crate) fn with(view: CycleView) -> Self {
        Self { views: vec![view] }
    }

    pub(crate) fn empty() -> Self {
        Self { views: Vec::new() }
    }
}

#[async_trait]
impl CycleReader for MockCycleReader {
    async fn get_by_id(&self, id: &CycleId) -> Result<Option<CycleView>, DomainError> {
        Ok(self.views.iter().find(|v| v.id == *id).cloned())
    }

    async fn get_latest_by_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<CycleView>, DomainError> {
        Ok(self
            .views
            .iter()
            .filter(|v| v.group_id == *group_id)
            .max_by_key(|v| v.cycle_number)
            .cloned())
    }
}

pub(crate) struct MockMeetingCalendar {
    recurrence: Option<MeetingRecurrence>,
}

impl MockMeetingCalendar {
    pub(crate) fn with(recurrence: MeetingRecurrence) -> Self {
        Self {
            recurrence: Some(recurrence),
        }
    }

    pub(crate) fn unset() -> Self {
        Self { recurrence: None }
    }
}

#[async_trait]
impl MeetingCalendar for MockMeetingCalendar {
    async fn recurrence_for_group(
        &self,
        _group_id: &GroupId,
    ) -> Result<Option<MeetingRecurrence>, DomainError> {
        Ok(self.recurrence.clone())
    }
}

pub(crate) struct MockFundReader {
    views: Vec<FundView>,
}

impl MockFundReader {
    pub(crate) fn with(view: FundView) -> Self {
        Self { views: vec![view] }
    }

    pub(crate) fn empty() -> Self {
        Self { views: Vec::new() }
    }
}

#[async_trait]
impl FundReader for MockFundReader {
    async fn get_by_id(&self, id: &FundId) -> Result<Option<FundView>, DomainError> {
        Ok(self.views.iter().find(|v| v.id == *id).cloned())
    }

    async fn list_by_cycle(&self, cycle_id: &CycleId) -> Result<Vec<FundView>, DomainError> {
        Ok(self
            .views
            .iter()
            .filter(|v| v.cycle_id == *cycle_id)
            .cloned()
            .collect())
    }
}

pub(crate) struct MockStrategyRepository {
    strategies: Vec<TransactionProcessingStrategy>,
}

impl MockStrategyRepository {
    pub(crate) fn with(id: StrategyId) -> Self {
        Self {
            strategies: vec![TransactionProcessingStrategy {
                id,
                code: "mifos-standard-strategy".to_string(),
                name: "Penalties, Fees, Interest, Principal order".to_string(),
            }],
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }
}

#[async_trait]
impl StrategyRepository for MockStrategyRepository {
    async fn find_by_id(
        &self,
        id: &StrategyId,
    ) -> Result<Option<TransactionProcessingStrategy>, DomainError> {
        Ok(self.strategies.iter().find(|s| s.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<TransactionProcessingStrategy>, DomainError> {
        Ok(self.strategies.clone())
    }
}
