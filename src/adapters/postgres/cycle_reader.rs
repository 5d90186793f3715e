//! PostgreSQL implementation of CycleReader.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    CycleId, CycleStatus, DepositsPaymentStrategy, DomainError, GroupId,
};
use crate::ports::{CycleReader, CycleView};

use super::codes::{db_err, decode};

const CYCLE_VIEW_COLUMNS: &str = r#"
    id, group_id, cycle_number, status_enum,
    currency_code, currency_digits, currency_multiples_of,
    expected_start_date, actual_start_date, expected_end_date, actual_end_date,
    expected_num_of_meetings, num_of_meetings_completed, num_of_meetings_pending,
    is_share_based, unit_price_of_share,
    is_client_additions_allowed_in_active_cycle,
    is_client_exit_allowed_in_active_cycle,
    does_individual_client_exit_forfeit_gains,
    deposits_payment_strategy_enum
"#;

/// PostgreSQL implementation of CycleReader.
#[derive(Clone)]
pub struct PostgresCycleReader {
    pool: PgPool,
}

impl PostgresCycleReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CycleReader for PostgresCycleReader {
    async fn get_by_id(&self, id: &CycleId) -> Result<Option<CycleView>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sg_cycles WHERE id = $1",
            CYCLE_VIEW_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch cycle", e))?;

        row.map(row_to_view).transpose()
    }

    async fn get_latest_by_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<CycleView>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {} FROM sg_cycles
            WHERE group_id = $1
            ORDER BY cycle_number DESC
            LIMIT 1
            "#,
            CYCLE_VIEW_COLUMNS
        ))
        .bind(group_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch latest cycle", e))?;

        row.map(row_to_view).transpose()
    }
}

fn row_to_view(row: sqlx::postgres::PgRow) -> Result<CycleView, DomainError> {
    let id: Uuid = row.get("id");
    let group_id: Uuid = row.get("group_id");
    let status_enum: i32 = row.get("status_enum");
    let strategy_enum: i32 = row.get("deposits_payment_strategy_enum");
    let currency_multiples_of: Option<i32> = row.get("currency_multiples_of");
    let actual_start_date: Option<NaiveDate> = row.get("actual_start_date");
    let actual_end_date: Option<NaiveDate> = row.get("actual_end_date");
    let unit_price_of_share: Decimal = row.get("unit_price_of_share");

    let status = decode("status_enum", status_enum, CycleStatus::from_code)?;
    let strategy = decode(
        "deposits_payment_strategy_enum",
        strategy_enum,
        DepositsPaymentStrategy::from_code,
    )?;

    Ok(CycleView {
        id: CycleId::from_uuid(id),
        group_id: GroupId::from_uuid(group_id),
        cycle_number: row.get::<i32, _>("cycle_number") as u32,
        status: status.option(),
        currency_code: row.get("currency_code"),
        currency_digits: row.get::<i32, _>("currency_digits") as u32,
        currency_multiples_of: currency_multiples_of.map(|m| m as u32),
        expected_start_date: row.get("expected_start_date"),
        actual_start_date,
        expected_end_date: row.get("expected_end_date"),
        actual_end_date,
        expected_num_of_meetings: row.get::<i32, _>("expected_num_of_meetings") as u32,
        num_of_meetings_completed: row.get::<i32, _>("num_of_meetings_completed") as u32,
        num_of_meetings_pending: row.get::<i32, _>("num_of_meetings_pending") as u32,
        is_share_based: row.get("is_share_based"),
        unit_price_of_share,
        is_client_additions_allowed_in_active_cycle: row
            .get("is_client_additions_allowed_in_active_cycle"),
        is_client_exit_allowed_in_active_cycle: row.get("is_client_exit_allowed_in_active_cycle"),
        does_individual_client_exit_forfeit_gains: row
            .get("does_individual_client_exit_forfeit_gains"),
        deposits_payment_strategy: strategy.option(),
    })
}
