//! PostgreSQL implementation of FundRepository.
//!
//! A fund persists across two tables: sg_funds carries the fund row with its
//! embedded loan-product terms, sg_fund_charges carries one row per charge.
//! Every write touching both goes through one transaction.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    AmortizationMethod, ChargeAppliesTo, ChargeCalculation, ChargeId, ChargeTime, CycleId,
    DomainError, ErrorCode, FundId, FundStatus, GroupId, InterestCalculationPeriod, InterestMethod,
    RepaymentFrequency, StrategyId,
};
use crate::domain::fund::{
    FundCharge, FundLoanProductDetail, FundTotals, LoanLimit, SavingsGroupFund,
};
use crate::ports::FundRepository;

use super::codes::{db_err, decode};

const FUND_COLUMNS: &str = r#"
    id, name, group_id, cycle_id, fund_status_enum,
    minimum_deposit_per_meeting, maximum_deposit_per_meeting,
    is_loan_limit_based_on_savings, loan_limit_amount, loan_limit_factor,
    total_cash_in_hand, total_cash_in_bank, total_deposits, total_loan_portfolio,
    total_fee_collected, total_expenses, total_income,
    annual_nominal_interest_rate, interest_method_enum,
    interest_calculated_in_period_enum, repay_every, repayment_period_frequency_enum,
    number_of_repayments, min_number_of_repayments, max_number_of_repayments,
    amortization_method_enum, transaction_processing_strategy_id
"#;

/// PostgreSQL implementation of FundRepository.
#[derive(Clone)]
pub struct PostgresFundRepository {
    pool: PgPool,
}

impl PostgresFundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_fund(
        tx: &mut Transaction<'_, Postgres>,
        fund: &SavingsGroupFund,
    ) -> Result<(), DomainError> {
        let totals = fund.totals();
        let detail = fund.loan_product_detail();
        sqlx::query(
            r#"
            INSERT INTO sg_funds (
                id, name, group_id, cycle_id, fund_status_enum,
                minimum_deposit_per_meeting, maximum_deposit_per_meeting,
                is_loan_limit_based_on_savings, loan_limit_amount, loan_limit_factor,
                total_cash_in_hand, total_cash_in_bank, total_deposits,
                total_loan_portfolio, total_fee_collected, total_expenses, total_income,
                annual_nominal_interest_rate, interest_method_enum,
                interest_calculated_in_period_enum, repay_every,
                repayment_period_frequency_enum, number_of_repayments,
                min_number_of_repayments, max_number_of_repayments,
                amortization_method_enum, transaction_processing_strategy_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                      $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)
            "#,
        )
        .bind(fund.id().as_uuid())
        .bind(fund.name())
        .bind(fund.group_id().as_uuid())
        .bind(fund.cycle_id().as_uuid())
        .bind(fund.status().code())
        .bind(fund.minimum_deposit_per_meeting())
        .bind(fund.maximum_deposit_per_meeting())
        .bind(fund.loan_limit().is_based_on_savings())
        .bind(fund.loan_limit().amount())
        .bind(fund.loan_limit().factor().map(|f| f as i32))
        .bind(totals.cash_in_hand)
        .bind(totals.cash_in_bank)
        .bind(totals.deposits)
        .bind(totals.loan_portfolio)
        .bind(totals.fee_collected)
        .bind(totals.expenses)
        .bind(totals.income)
        .bind(detail.annual_nominal_interest_rate())
        .bind(detail.interest_method().code())
        .bind(detail.interest_calculated_in_period().code())
        .bind(detail.repay_every() as i32)
        .bind(detail.repayment_frequency().code())
        .bind(detail.number_of_repayments() as i32)
        .bind(detail.min_number_of_repayments().map(|n| n as i32))
        .bind(detail.max_number_of_repayments().map(|n| n as i32))
        .bind(detail.amortization_method().code())
        .bind(detail.transaction_processing_strategy_id().as_uuid())
        .execute(&mut **tx)
        .await
        .map_err(|e| db_err("Failed to insert fund", e))?;

        for charge in fund.charges() {
            Self::insert_charge(tx, fund.id(), charge).await?;
        }
        Ok(())
    }

    async fn insert_charge(
        tx: &mut Transaction<'_, Postgres>,
        fund_id: FundId,
        charge: &FundCharge,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sg_fund_charges (
                id, fund_id, charge_applies_to_enum, charge_time_enum,
                charge_calculation_enum, amount, is_penalty, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(charge.id().as_uuid())
        .bind(fund_id.as_uuid())
        .bind(charge.applies_to().code())
        .bind(charge.time().code())
        .bind(charge.calculation().code())
        .bind(charge.amount())
        .bind(charge.is_penalty())
        .bind(charge.is_active())
        .execute(&mut **tx)
        .await
        .map_err(|e| db_err("Failed to insert fund charge", e))?;
        Ok(())
    }

    async fn load_charges(&self, fund_id: &FundId) -> Result<Vec<FundCharge>, DomainError> {
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

        rows.into_iter().map(row_to_charge).collect()
    }

    async fn hydrate(&self, row: sqlx::postgres::PgRow) -> Result<SavingsGroupFund, DomainError> {
        let id: Uuid = row.get("id");
        let fund_id = FundId::from_uuid(id);
        let charges = self.load_charges(&fund_id).await?;
        row_to_fund(row, charges)
    }
}

#[async_trait]
impl FundRepository for PostgresFundRepository {
    async fn save(&self, fund: &SavingsGroupFund) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("Failed to begin transaction", e))?;
        Self::insert_fund(&mut tx, fund).await?;
        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))
    }

    async fn update(&self, fund: &SavingsGroupFund) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("Failed to begin transaction", e))?;

        let detail = fund.loan_product_detail();
        let result = sqlx::query(
            r#"
            UPDATE sg_funds SET
                name = $2,
                fund_status_enum = $3,
                minimum_deposit_per_meeting = $4,
                maximum_deposit_per_meeting = $5,
                is_loan_limit_based_on_savings = $6,
                loan_limit_amount = $7,
                loan_limit_factor = $8,
                annual_nominal_interest_rate = $9,
                interest_method_enum = $10,
                interest_calculated_in_period_enum = $11,
                repay_every = $12,
                repayment_period_frequency_enum = $13,
                number_of_repayments = $14,
                min_number_of_repayments = $15,
                max_number_of_repayments = $16,
                amortization_method_enum = $17,
                transaction_processing_strategy_id = $18
            WHERE id = $1
            "#,
        )
        .bind(fund.id().as_uuid())
        .bind(fund.name())
        .bind(fund.status().code())
        .bind(fund.minimum_deposit_per_meeting())
        .bind(fund.maximum_deposit_per_meeting())
        .bind(fund.loan_limit().is_based_on_savings())
        .bind(fund.loan_limit().amount())
        .bind(fund.loan_limit().factor().map(|f| f as i32))
        .bind(detail.annual_nominal_interest_rate())
        .bind(detail.interest_method().code())
        .bind(detail.interest_calculated_in_period().code())
        .bind(detail.repay_every() as i32)
        .bind(detail.repayment_frequency().code())
        .bind(detail.number_of_repayments() as i32)
        .bind(detail.min_number_of_repayments().map(|n| n as i32))
        .bind(detail.max_number_of_repayments().map(|n| n as i32))
        .bind(detail.amortization_method().code())
        .bind(detail.transaction_processing_strategy_id().as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_err("Failed to update fund", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::FundNotFound,
                "fund.not.found",
                format!("Fund not found: {}", fund.id()),
            ));
        }

        // Upsert keeps charge rows in step with the aggregate's charge list
        for charge in fund.charges() {
            sqlx::query(
                r#"
                INSERT INTO sg_fund_charges (
                    id, fund_id, charge_applies_to_enum, charge_time_enum,
                    charge_calculation_enum, amount, is_penalty, is_active
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO UPDATE SET
                    amount = EXCLUDED.amount,
                    is_active = EXCLUDED.is_active
                "#,
            )
            .bind(charge.id().as_uuid())
            .bind(fund.id().as_uuid())
            .bind(charge.applies_to().code())
            .bind(charge.time().code())
            .bind(charge.calculation().code())
            .bind(charge.amount())
            .bind(charge.is_penalty())
            .bind(charge.is_active())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to upsert fund charge", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))
    }

    async fn save_all(&self, funds: &[SavingsGroupFund]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("Failed to begin transaction", e))?;
        for fund in funds {
            Self::insert_fund(&mut tx, fund).await?;
        }
        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))
    }

    async fn find_by_id(&self, id: &FundId) -> Result<Option<SavingsGroupFund>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM sg_funds WHERE id = $1", FUND_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Failed to fetch fund", e))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_cycle(
        &self,
        cycle_id: &CycleId,
    ) -> Result<Vec<SavingsGroupFund>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sg_funds WHERE cycle_id = $1 ORDER BY name",
            FUND_COLUMNS
        ))
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch cycle funds", e))?;

        let mut funds = Vec::with_capacity(rows.len());
        for row in rows {
            funds.push(self.hydrate(row).await?);
        }
        Ok(funds)
    }

    async fn find_active_by_cycle(
        &self,
        cycle_id: &CycleId,
    ) -> Result<Vec<SavingsGroupFund>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sg_funds WHERE cycle_id = $1 AND fund_status_enum = $2 ORDER BY name",
            FUND_COLUMNS
        ))
        .bind(cycle_id.as_uuid())
        .bind(FundStatus::Active.code())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch active cycle funds", e))?;

        let mut funds = Vec::with_capacity(rows.len());
        for row in rows {
            funds.push(self.hydrate(row).await?);
        }
        Ok(funds)
    }
}

fn row_to_charge(row: sqlx::postgres::PgRow) -> Result<FundCharge, DomainError> {
    let id: Uuid = row.get("id");
    let applies_to: i32 = row.get("charge_applies_to_enum");
    let time: i32 = row.get("charge_time_enum");
    let calculation: i32 = row.get("charge_calculation_enum");
    let amount: Decimal = row.get("amount");

    Ok(FundCharge::reconstitute(
        ChargeId::from_uuid(id),
        decode("charge_applies_to_enum", applies_to, ChargeAppliesTo::from_code)?,
        decode("charge_time_enum", time, ChargeTime::from_code)?,
        decode(
            "charge_calculation_enum",
            calculation,
            ChargeCalculation::from_code,
        )?,
        amount,
        row.get("is_penalty"),
        row.get("is_active"),
    ))
}

fn row_to_fund(
    row: sqlx::postgres::PgRow,
    charges: Vec<FundCharge>,
) -> Result<SavingsGroupFund, DomainError> {
    let id: Uuid = row.get("id");
    let group_id: Uuid = row.get("group_id");
    let cycle_id: Uuid = row.get("cycle_id");
    let status: i32 = row.get("fund_status_enum");
    let is_based_on_savings: bool = row.get("is_loan_limit_based_on_savings");
    let loan_limit_amount: Option<Decimal> = row.get("loan_limit_amount");
    let loan_limit_factor: Option<i32> = row.get("loan_limit_factor");
    let strategy_id: Uuid = row.get("transaction_processing_strategy_id");

    let loan_limit = match (is_based_on_savings, loan_limit_factor, loan_limit_amount) {
        (true, Some(factor), _) => LoanLimit::BasedOnSavings {
            factor: factor as u32,
        },
        (false, _, Some(amount)) => LoanLimit::FixedAmount { amount },
        _ => {
            return Err(DomainError::database(format!(
                "Fund {} has an inconsistent loan limit",
                id
            )))
        }
    };

    let detail = FundLoanProductDetail::reconstitute(
        row.get("annual_nominal_interest_rate"),
        decode(
            "interest_method_enum",
            row.get("interest_method_enum"),
            InterestMethod::from_code,
        )?,
        decode(
            "interest_calculated_in_period_enum",
            row.get("interest_calculated_in_period_enum"),
            InterestCalculationPeriod::from_code,
        )?,
        row.get::<i32, _>("repay_every") as u32,
        decode(
            "repayment_period_frequency_enum",
            row.get("repayment_period_frequency_enum"),
            RepaymentFrequency::from_code,
        )?,
        row.get::<i32, _>("number_of_repayments") as u32,
        row.get::<Option<i32>, _>("min_number_of_repayments")
            .map(|n| n as u32),
        row.get::<Option<i32>, _>("max_number_of_repayments")
            .map(|n| n as u32),
        decode(
            "amortization_method_enum",
            row.get("amortization_method_enum"),
            AmortizationMethod::from_code,
        )?,
        StrategyId::from_uuid(strategy_id),
    );

    Ok(SavingsGroupFund::reconstitute(
        FundId::from_uuid(id),
        row.get("name"),
        GroupId::from_uuid(group_id),
        CycleId::from_uuid(cycle_id),
        decode("fund_status_enum", status, FundStatus::from_code)?,
        row.get("minimum_deposit_per_meeting"),
        row.get("maximum_deposit_per_meeting"),
        loan_limit,
        FundTotals {
            cash_in_hand: row.get("total_cash_in_hand"),
            cash_in_bank: row.get("total_cash_in_bank"),
            deposits: row.get("total_deposits"),
            loan_portfolio: row.get("total_loan_portfolio"),
            fee_collected: row.get("total_fee_collected"),
            expenses: row.get("total_expenses"),
            income: row.get("total_income"),
        },
        detail,
        charges,
    ))
}
