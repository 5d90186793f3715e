//! PostgreSQL implementation of CycleRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::cycle::SavingsGroupCycle;
use crate::domain::foundation::{
    Currency, CycleId, CycleStatus, DepositsPaymentStrategy, DomainError, ErrorCode, GroupId,
    ShareProductId,
};
use crate::ports::CycleRepository;

use super::codes::{db_err, decode};

const CYCLE_COLUMNS: &str = r#"
    id, group_id, cycle_number, status_enum,
    currency_code, currency_digits, currency_multiples_of,
    expected_start_date, actual_start_date, expected_end_date, actual_end_date,
    expected_num_of_meetings, num_of_meetings_completed, num_of_meetings_pending,
    is_share_based, unit_price_of_share, share_product_id,
    is_client_additions_allowed_in_active_cycle,
    is_client_exit_allowed_in_active_cycle,
    does_individual_client_exit_forfeit_gains,
    deposits_payment_strategy_enum
"#;

/// PostgreSQL implementation of CycleRepository.
#[derive(Clone)]
pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn save(&self, cycle: &SavingsGroupCycle) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sg_cycles (
                id, group_id, cycle_number, status_enum,
                currency_code, currency_digits, currency_multiples_of,
                expected_start_date, actual_start_date, expected_end_date, actual_end_date,
                expected_num_of_meetings, num_of_meetings_completed, num_of_meetings_pending,
                is_share_based, unit_price_of_share, share_product_id,
                is_client_additions_allowed_in_active_cycle,
                is_client_exit_allowed_in_active_cycle,
                does_individual_client_exit_forfeit_gains,
                deposits_payment_strategy_enum
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                      $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.group_id().as_uuid())
        .bind(cycle.cycle_number() as i32)
        .bind(cycle.status().code())
        .bind(cycle.currency().code())
        .bind(cycle.currency().digits() as i32)
        .bind(cycle.currency().in_multiples_of().map(|m| m as i32))
        .bind(cycle.expected_start_date())
        .bind(cycle.actual_start_date())
        .bind(cycle.expected_end_date())
        .bind(cycle.actual_end_date())
        .bind(cycle.expected_num_of_meetings() as i32)
        .bind(cycle.num_of_meetings_completed() as i32)
        .bind(cycle.num_of_meetings_pending() as i32)
        .bind(cycle.is_share_based())
        .bind(cycle.unit_price_of_share())
        .bind(cycle.share_product_id().map(|id| *id.as_uuid()))
        .bind(cycle.is_client_additions_allowed_in_active_cycle())
        .bind(cycle.is_client_exit_allowed_in_active_cycle())
        .bind(cycle.does_individual_client_exit_forfeit_gains())
        .bind(cycle.deposits_payment_strategy().code())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to insert cycle", e))?;

        Ok(())
    }

    async fn update(&self, cycle: &SavingsGroupCycle) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sg_cycles SET
                status_enum = $2,
                currency_code = $3,
                currency_digits = $4,
                currency_multiples_of = $5,
                expected_start_date = $6,
                actual_start_date = $7,
                expected_end_date = $8,
                actual_end_date = $9,
                expected_num_of_meetings = $10,
                num_of_meetings_completed = $11,
                num_of_meetings_pending = $12,
                is_share_based = $13,
                unit_price_of_share = $14,
                is_client_additions_allowed_in_active_cycle = $15,
                is_client_exit_allowed_in_active_cycle = $16,
                does_individual_client_exit_forfeit_gains = $17,
                deposits_payment_strategy_enum = $18
            WHERE id = $1
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.status().code())
        .bind(cycle.currency().code())
        .bind(cycle.currency().digits() as i32)
        .bind(cycle.currency().in_multiples_of().map(|m| m as i32))
        .bind(cycle.expected_start_date())
        .bind(cycle.actual_start_date())
        .bind(cycle.expected_end_date())
        .bind(cycle.actual_end_date())
        .bind(cycle.expected_num_of_meetings() as i32)
        .bind(cycle.num_of_meetings_completed() as i32)
        .bind(cycle.num_of_meetings_pending() as i32)
        .bind(cycle.is_share_based())
        .bind(cycle.unit_price_of_share())
        .bind(cycle.is_client_additions_allowed_in_active_cycle())
        .bind(cycle.is_client_exit_allowed_in_active_cycle())
        .bind(cycle.does_individual_client_exit_forfeit_gains())
        .bind(cycle.deposits_payment_strategy().code())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update cycle", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CycleNotFound,
                "cycle.not.found",
                format!("Cycle not found: {}", cycle.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<SavingsGroupCycle>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sg_cycles WHERE id = $1",
            CYCLE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch cycle", e))?;

        row.map(row_to_cycle).transpose()
    }

    async fn find_latest_by_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<SavingsGroupCycle>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {} FROM sg_cycles
            WHERE group_id = $1
            ORDER BY cycle_number DESC
            LIMIT 1
            "#,
            CYCLE_COLUMNS
        ))
        .bind(group_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch latest cycle", e))?;

        row.map(row_to_cycle).transpose()
    }
}

fn row_to_cycle(row: sqlx::postgres::PgRow) -> Result<SavingsGroupCycle, DomainError> {
    let id: Uuid = row.get("id");
    let group_id: Uuid = row.get("group_id");
    let cycle_number: i32 = row.get("cycle_number");
    let status_enum: i32 = row.get("status_enum");
    let currency_code: String = row.get("currency_code");
    let currency_digits: i32 = row.get("currency_digits");
    let currency_multiples_of: Option<i32> = row.get("currency_multiples_of");
    let expected_start_date: NaiveDate = row.get("expected_start_date");
    let actual_start_date: Option<NaiveDate> = row.get("actual_start_date");
    let expected_end_date: NaiveDate = row.get("expected_end_date");
    let actual_end_date: Option<NaiveDate> = row.get("actual_end_date");
    let expected_num_of_meetings: i32 = row.get("expected_num_of_meetings");
    let num_of_meetings_completed: i32 = row.get("num_of_meetings_completed");
    let num_of_meetings_pending: i32 = row.get("num_of_meetings_pending");
    let is_share_based: bool = row.get("is_share_based");
    let unit_price_of_share: Decimal = row.get("unit_price_of_share");
    let share_product_id: Option<Uuid> = row.get("share_product_id");
    let deposits_payment_strategy_enum: i32 = row.get("deposits_payment_strategy_enum");

    Ok(SavingsGroupCycle::reconstitute(
        CycleId::from_uuid(id),
        GroupId::from_uuid(group_id),
        cycle_number as u32,
        decode("status_enum", status_enum, CycleStatus::from_code)?,
        Currency::reconstitute(
            currency_code,
            currency_digits as u32,
            currency_multiples_of.map(|m| m as u32),
        ),
        expected_start_date,
        actual_start_date,
        expected_end_date,
        actual_end_date,
        expected_num_of_meetings as u32,
        num_of_meetings_completed as u32,
        num_of_meetings_pending as u32,
        is_share_based,
        unit_price_of_share,
        share_product_id.map(ShareProductId::from_uuid),
        row.get("is_client_additions_allowed_in_active_cycle"),
        row.get("is_client_exit_allowed_in_active_cycle"),
        row.get("does_individual_client_exit_forfeit_gains"),
        decode(
            "deposits_payment_strategy_enum",
            deposits_payment_strategy_enum,
            DepositsPaymentStrategy::from_code,
        )?,
    ))
}
