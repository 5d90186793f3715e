//! PostgreSQL implementation of CurrencyRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::DomainError;
use crate::ports::{CurrencyOption, CurrencyRepository};

use super::codes::db_err;

/// PostgreSQL implementation of CurrencyRepository.
#[derive(Clone)]
pub struct PostgresCurrencyRepository {
    pool: PgPool,
}

impl PostgresCurrencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyRepository for PostgresCurrencyRepository {
    async fn list_allowed(&self) -> Result<Vec<CurrencyOption>, DomainError> {
        let rows = sqlx::query(
            "SELECT code, name, decimal_places FROM allowed_currencies ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list allowed currencies", e))?;

        Ok(rows
            .into_iter()
            .map(|row| CurrencyOption {
                code: row.get("code"),
                name: row.get("name"),
                decimal_places: row.get::<i32, _>("decimal_places") as u32,
            })
            .collect())
    }
}
