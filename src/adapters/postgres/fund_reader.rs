//! PostgreSQL implementation of FundReader.
//!
//! Fund views join the strategy table for a display name and render every
//! coded column as an enum option.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    AmortizationMethod, ChargeAppliesTo, ChargeCalculation, ChargeId, ChargeTime, CycleId,
    DomainError, FundId, FundStatus, InterestCalculationPeriod, InterestMethod,
    RepaymentFrequency, StrategyId,
};
use crate::ports::{FundChargeView, FundLoanProductView, FundReader, FundView};

use super::codes::{db_err, decode};

const FUND_VIEW_COLUMNS: &str = r#"
    f.id, f.name, f.cycle_id, f.fund_status_enum,
    f.minimum_deposit_per_meeting, f.maximum_deposit_per_meeting,
    f.is_loan_limit_based_on_savings, f.loan_limit_amount, f.loan_limit_factor,
    f.total_cash_in_hand, f.total_cash_in_bank, f.total_deposits,
    f.total_loan_portfolio, f.total_fee_collected, f.total_expenses, f.total_income,
    f.annual_nominal_interest_rate, f.interest_method_enum,
    f.interest_calculated_in_period_enum, f.repay_every,
    f.repayment_period_frequency_enum, f.number_of_repayments,
    f.min_number_of_repayments, f.max_number_of_repayments,
    f.amortization_method_enum, f.transaction_processing_strategy_id,
    s.name AS strategy_name
"#;

/// PostgreSQL implementation of FundReader.
#[derive(Clone)]
pub struct PostgresFundReader {
    pool: PgPool,
}

impl PostgresFundReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn charge_views(&self, fund_id: &FundId) -> Result<Vec<FundChargeView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, charge_applies_to_enum, charge_time_enum,
                   charge_calculation_enum, amount, is_penalty, is_active
            FROM sg_fund_charges
            WHERE fund_id = $1
            ORDER BY id
            "#,
        )
        .bind(fund_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch fund charges", e))?;

        rows.into_iter().map(row_to_charge_view).collect()
    }

    async fn hydrate(&self, row: sqlx::postgres::PgRow) -> Result<FundView, DomainError> {
        let id: Uuid = row.get("id");
        let fund_id = FundId::from_uuid(id);
        let charges = self.charge_views(&fund_id).await?;
        row_to_view(row, charges)
    }
}

#[async_trait]
impl FundReader for PostgresFundReader {
    async fn get_by_id(&self, id: &FundId) -> Result<Option<FundView>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {} FROM sg_funds f
            JOIN loan_transaction_processing_strategies s
              ON s.id = f.transaction_processing_strategy_id
            WHERE f.id = $1
            "#,
            FUND_VIEW_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch fund", e))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_cycle(&self, cycle_id: &CycleId) -> Result<Vec<FundView>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM sg_funds f
            JOIN loan_transaction_processing_strategies s
              ON s.id = f.transaction_processing_strategy_id
            WHERE f.cycle_id = $1
            ORDER BY f.name
            "#,
            FUND_VIEW_COLUMNS
        ))
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch cycle funds", e))?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(self.hydrate(row).await?);
        }
        Ok(views)
    }
}

fn row_to_charge_view(row: sqlx::postgres::PgRow) -> Result<FundChargeView, DomainError> {
    let id: Uuid = row.get("id");
    let amount: Decimal = row.get("amount");
    let applies_to = decode(
        "charge_applies_to_enum",
        row.get("charge_applies_to_enum"),
        ChargeAppliesTo::from_code,
    )?;
    let time = decode("charge_time_enum", row.get("charge_time_enum"), ChargeTime::from_code)?;
    let calculation = decode(
        "charge_calculation_enum",
        row.get("charge_calculation_enum"),
        ChargeCalculation::from_code,
    )?;

    Ok(FundChargeView {
        id: ChargeId::from_uuid(id),
        charge_applies_to: applies_to.option(),
        charge_time: time.option(),
        charge_calculation: calculation.option(),
        amount,
        penalty: row.get("is_penalty"),
        active: row.get("is_active"),
    })
}

fn row_to_view(
    row: sqlx::postgres::PgRow,
    charges: Vec<FundChargeView>,
) -> Result<FundView, DomainError> {
    let id: Uuid = row.get("id");
    let cycle_id: Uuid = row.get("cycle_id");
    let strategy_id: Uuid = row.get("transaction_processing_strategy_id");
    let loan_limit_amount: Option<Decimal> = row.get("loan_limit_amount");
    let loan_limit_factor: Option<i32> = row.get("loan_limit_factor");

    let status = decode("fund_status_enum", row.get("fund_status_enum"), FundStatus::from_code)?;
    let interest_method = decode(
        "interest_method_enum",
        row.get("interest_method_enum"),
        InterestMethod::from_code,
    )?;
    let interest_period = decode(
        "interest_calculated_in_period_enum",
        row.get("interest_calculated_in_period_enum"),
        InterestCalculationPeriod::from_code,
    )?;
    let repayment_frequency = decode(
        "repayment_period_frequency_enum",
        row.get("repayment_period_frequency_enum"),
        RepaymentFrequency::from_code,
    )?;
    let amortization = decode(
        "amortization_method_enum",
        row.get("amortization_method_enum"),
        AmortizationMethod::from_code,
    )?;

    Ok(FundView {
        id: FundId::from_uuid(id),
        name: row.get("name"),
        cycle_id: CycleId::from_uuid(cycle_id),
        fund_status: status.option(),
        minimum_deposit_per_meeting: row.get("minimum_deposit_per_meeting"),
        maximum_deposit_per_meeting: row.get("maximum_deposit_per_meeting"),
        is_loan_limit_based_on_savings: row.get("is_loan_limit_based_on_savings"),
        loan_limit_amount,
        loan_limit_factor: loan_limit_factor.map(|f| f as u32),
        total_cash_in_hand: row.get("total_cash_in_hand"),
        total_cash_in_bank: row.get("total_cash_in_bank"),
        total_deposits: row.get("total_deposits"),
        total_loan_portfolio: row.get("total_loan_portfolio"),
        total_fee_collected: row.get("total_fee_collected"),
        total_expenses: row.get("total_expenses"),
        total_income: row.get("total_income"),
        loan_product: FundLoanProductView {
            annual_nominal_interest_rate: row.get("annual_nominal_interest_rate"),
            interest_method: interest_method.option(),
            interest_calculated_in_period: interest_period.option(),
            repay_every: row.get::<i32, _>("repay_every") as u32,
            repayment_period_frequency: repayment_frequency.option(),
            number_of_repayments: row.get::<i32, _>("number_of_repayments") as u32,
            min_number_of_repayments: row
                .get::<Option<i32>, _>("min_number_of_repayments")
                .map(|n| n as u32),
            max_number_of_repayments: row
                .get::<Option<i32>, _>("max_number_of_repayments")
                .map(|n| n as u32),
            amortization_method: amortization.option(),
            transaction_processing_strategy_id: StrategyId::from_uuid(strategy_id),
            transaction_processing_strategy_name: row.get("strategy_name"),
        },
        charges,
    })
}
