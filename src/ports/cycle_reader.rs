//! Cycle reader port (read side / CQRS queries).
//!
//! Defines the contract for cycle queries. Views render coded values as
//! enum options so API clients never see raw codes.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{CycleId, DomainError, EnumOption, GroupId};

/// Reader port for cycle queries.
#[async_trait]
pub trait CycleReader: Send + Sync {
    /// Get a detailed cycle view by ID.
    ///
    /// Returns `None` if not found.
    async fn get_by_id(&self, id: &CycleId) -> Result<Option<CycleView>, DomainError>;

    /// Get the latest cycle of a group.
    ///
    /// Returns `None` when the group has no cycle yet.
    async fn get_latest_by_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<CycleView>, DomainError>;
}

/// Detailed view of a savings-group cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleView {
    pub id: CycleId,
    pub group_id: GroupId,
    pub cycle_number: u32,
    pub status: EnumOption,
    pub currency_code: String,
    pub currency_digits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_multiples_of: Option<u32>,
    pub expected_start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_date: Option<NaiveDate>,
    pub expected_end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end_date: Option<NaiveDate>,
    pub expected_num_of_meetings: u32,
    pub num_of_meetings_completed: u32,
    pub num_of_meetings_pending: u32,
    pub is_share_based: bool,
    pub unit_price_of_share: Decimal,
    pub is_client_additions_allowed_in_active_cycle: bool,
    pub is_client_exit_allowed_in_active_cycle: bool,
    pub does_individual_client_exit_forfeit_gains: bool,
    pub deposits_payment_strategy: EnumOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn CycleReader) {}
    }
}
