//! PostgreSQL implementation of GroupRepository.
//!
//! Groups live in a platform-owned table; this adapter only reads the
//! columns cycle and fund commands care about.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, GroupId, GroupType};
use crate::ports::{GroupRecord, GroupRepository};

use super::codes::{db_err, decode};

/// PostgreSQL implementation of GroupRepository.
#[derive(Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<GroupRecord>, DomainError> {
        let row = sqlx::query(
            "SELECT id, group_type_enum, activation_date FROM groups WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch group", e))?;

        row.map(|row| {
            let id: Uuid = row.get("id");
            let group_type_enum: i32 = row.get("group_type_enum");
            let activation_date: NaiveDate = row.get("activation_date");
            Ok(GroupRecord {
                id: GroupId::from_uuid(id),
                group_type: decode("group_type_enum", group_type_enum, GroupType::from_code)?,
                activation_date,
            })
        })
        .transpose()
    }
}
