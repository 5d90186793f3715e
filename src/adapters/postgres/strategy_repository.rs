//! PostgreSQL implementation of StrategyRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, StrategyId};
use crate::ports::{StrategyRepository, TransactionProcessingStrategy};

use super::codes::db_err;

/// PostgreSQL implementation of StrategyRepository.
#[derive(Clone)]
pub struct PostgresStrategyRepository {
    pool: PgPool,
}

impl PostgresStrategyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StrategyRepository for PostgresStrategyRepository {
    async fn find_by_id(
        &self,
        id: &StrategyId,
    ) -> Result<Option<TransactionProcessingStrategy>, DomainError> {
        let row = sqlx::query(
            "SELECT id, code, name FROM loan_transaction_processing_strategies WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch strategy", e))?;

        Ok(row.map(row_to_strategy))
    }

    async fn list_all(&self) -> Result<Vec<TransactionProcessingStrategy>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, code, name FROM loan_transaction_processing_strategies ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list strategies", e))?;

        Ok(rows.into_iter().map(row_to_strategy).collect())
    }
}

fn row_to_strategy(row: sqlx::postgres::PgRow) -> TransactionProcessingStrategy {
    let id: Uuid = row.get("id");
    TransactionProcessingStrategy {
        id: StrategyId::from_uuid(id),
        code: row.get("code"),
        name: row.get("name"),
    }
}
