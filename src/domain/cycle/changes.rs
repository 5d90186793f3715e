//! Change-set returned by cycle mutations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{Currency, CycleStatus, DepositsPaymentStrategy};

/// Fields actually modified by a cycle command. Unchanged fields stay None
/// and are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_num_of_meetings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_share_based: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price_of_share: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_client_additions_allowed_in_active_cycle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_client_exit_allowed_in_active_cycle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub does_individual_client_exit_forfeit_gains: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposits_payment_strategy: Option<DepositsPaymentStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CycleStatus>,
}

impl CycleChanges {
    pub fn is_empty(&self) -> bool {
        self == &CycleChanges::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changes_are_empty() {
        assert!(CycleChanges::default().is_empty());
    }

    #[test]
    fn serialization_omits_unchanged_fields() {
        let changes = CycleChanges {
            status: Some(CycleStatus::Active),
            actual_start_date: NaiveDate::from_ymd_opt(2024, 1, 8),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        let json = serde_json::to_value(&changes).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["actualStartDate"], "2024-01-08");
        assert!(json.get("expectedEndDate").is_none());
    }
}
