//! GetCycleTemplateHandler - Query handler for cycle creation templates.
//!
//! The template carries the option lists a client needs to build a cycle
//! request, plus defaults seeded from the group's latest cycle when one
//! exists (currency, share settings, policies, payment strategy).

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::handlers::common::resolve_savings_group;
use crate::domain::foundation::{DepositsPaymentStrategy, DomainError, EnumOption, GroupId};
use crate::ports::{CurrencyOption, CurrencyRepository, CycleReader, GroupRepository};

/// Query for the cycle creation template of a group.
#[derive(Debug, Clone)]
pub struct GetCycleTemplateQuery {
    pub group_id: GroupId,
}

/// Option lists plus latest-cycle-seeded defaults.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_multiples_of: Option<u32>,
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
    pub deposits_payment_strategy: Option<EnumOption>,
    pub currency_options: Vec<CurrencyOption>,
    pub deposits_payment_strategy_options: Vec<EnumOption>,
}

/// Handler for cycle template queries.
pub struct GetCycleTemplateHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_reader: Arc<dyn CycleReader>,
    currency_repository: Arc<dyn CurrencyRepository>,
}

impl GetCycleTemplateHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_reader: Arc<dyn CycleReader>,
        currency_repository: Arc<dyn CurrencyRepository>,
    ) -> Self {
        Self {
            group_repository,
            cycle_reader,
            currency_repository,
        }
    }

    pub async fn handle(&self, query: GetCycleTemplateQuery) -> Result<CycleTemplate, DomainError> {
        // 1. The group must exist and be a savings group
        resolve_savings_group(self.group_repository.as_ref(), &query.group_id).await?;

        // 2. Seed defaults from the latest cycle when the group has one
        let latest = self.cycle_reader.get_latest_by_group(&query.group_id).await?;
        let currency_options = self.currency_repository.list_allowed().await?;

        let mut template = CycleTemplate {
            currency_code: None,
            currency_digits: None,
            currency_multiples_of: None,
            is_share_based: None,
            unit_price_of_share: None,
            is_client_additions_allowed_in_active_cycle: None,
            is_client_exit_allowed_in_active_cycle: None,
            does_individual_client_exit_forfeit_gains: None,
            deposits_payment_strategy: None,
            currency_options,
            deposits_payment_strategy_options: DepositsPaymentStrategy::options(),
        };

        if let Some(cycle) = latest {
            template.currency_code = Some(cycle.currency_code);
            template.currency_digits = Some(cycle.currency_digits);
            template.currency_multiples_of = cycle.currency_multiples_of;
            template.is_share_based = Some(cycle.is_share_based);
            template.unit_price_of_share = Some(cycle.unit_price_of_share);
            template.is_client_additions_allowed_in_active_cycle =
                Some(cycle.is_client_additions_allowed_in_active_cycle);
            template.is_client_exit_allowed_in_active_cycle =
                Some(cycle.is_client_exit_allowed_in_active_cycle);
            template.does_individual_client_exit_forfeit_gains =
                Some(cycle.does_individual_client_exit_forfeit_gains);
            template.deposits_payment_strategy = Some(cycle.deposits_payment_strategy);
        }

        Ok(template)
    }
}
