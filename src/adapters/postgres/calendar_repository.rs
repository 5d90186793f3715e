//! PostgreSQL implementation of MeetingCalendar.
//!
//! The platform's calendar module owns group_meeting_calendars; this adapter
//! projects a row into the pure recurrence value the domain computes with.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::calendar::{MeetingFrequency, MeetingRecurrence};
use crate::domain::foundation::{DomainError, GroupId};
use crate::ports::MeetingCalendar;

use super::codes::db_err;

/// PostgreSQL implementation of MeetingCalendar.
#[derive(Clone)]
pub struct PostgresMeetingCalendar {
    pool: PgPool,
}

impl PostgresMeetingCalendar {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetingCalendar for PostgresMeetingCalendar {
    async fn recurrence_for_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<MeetingRecurrence>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT start_date, frequency_enum, recurrence_interval
            FROM group_meeting_calendars
            WHERE group_id = $1
            "#,
        )
        .bind(group_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch group meeting calendar", e))?;

        row.map(|row| {
            let start_date: NaiveDate = row.get("start_date");
            let frequency_enum: i32 = row.get("frequency_enum");
            let interval: i32 = row.get("recurrence_interval");
            let frequency = frequency_from_code(frequency_enum)?;
            MeetingRecurrence::new(start_date, frequency, interval as u32)
        })
        .transpose()
    }
}

fn frequency_from_code(code: i32) -> Result<MeetingFrequency, DomainError> {
    match code {
        1 => Ok(MeetingFrequency::Daily),
        2 => Ok(MeetingFrequency::Weekly),
        3 => Ok(MeetingFrequency::Monthly),
        4 => Ok(MeetingFrequency::Yearly),
        other => Err(DomainError::database(format!(
            "Stored code {} is not a valid meeting frequency",
            other
        ))),
    }
}
