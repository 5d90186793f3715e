//! GetFundTemplateHandler - Query handler for fund creation templates.

use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::common::resolve_savings_group;
use crate::domain::foundation::{
    AmortizationMethod, ChargeAppliesTo, ChargeCalculation, ChargeTime, DomainError, EnumOption,
    GroupId, InterestCalculationPeriod, InterestMethod, RepaymentFrequency,
};
use crate::ports::{GroupRepository, StrategyRepository, TransactionProcessingStrategy};

/// Query for the fund creation template of a group.
#[derive(Debug, Clone)]
pub struct GetFundTemplateQuery {
    pub group_id: GroupId,
}

/// Option lists a client needs to build a fund request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTemplate {
    pub interest_method_options: Vec<EnumOption>,
    pub interest_calculated_in_period_options: Vec<EnumOption>,
    pub repayment_frequency_options: Vec<EnumOption>,
    pub amortization_method_options: Vec<EnumOption>,
    pub charge_applies_to_options: Vec<EnumOption>,
    pub charge_time_options: Vec<EnumOption>,
    pub charge_calculation_options: Vec<EnumOption>,
    pub transaction_processing_strategy_options: Vec<TransactionProcessingStrategy>,
}

/// Handler for fund template queries.
pub struct GetFundTemplateHandler {
    group_repository: Arc<dyn GroupRepository>,
    strategy_repository: Arc<dyn StrategyRepository>,
}

impl GetFundTemplateHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        strategy_repository: Arc<dyn StrategyRepository>,
    ) -> Self {
        Self {
            group_repository,
            strategy_repository,
        }
    }

    pub async fn handle(&self, query: GetFundTemplateQuery) -> Result<FundTemplate, DomainError> {
        resolve_savings_group(self.group_repository.as_ref(), &query.group_id).await?;

        let strategies = self.strategy_repository.list_all().await?;
        Ok(FundTemplate {
            interest_method_options: InterestMethod::options(),
            interest_calculated_in_period_options: InterestCalculationPeriod::options(),
            repayment_frequency_options: RepaymentFrequency::options(),
            amortization_method_options: AmortizationMethod::options(),
            charge_applies_to_options: ChargeAppliesTo::options(),
            charge_time_options: ChargeTime::options(),
            charge_calculation_options: ChargeCalculation::options(),
            transaction_processing_strategy_options: strategies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        savings_group, MockGroupRepository, MockStrategyRepository,
    };
    use crate::domain::foundation::StrategyId;

    #[tokio::test]
    async fn template_carries_every_option_list() {
        let group_id = GroupId::new();
        let handler = GetFundTemplateHandler::new(
            Arc::new(MockGroupRepository::with(savings_group(group_id))),
            Arc::new(MockStrategyRepository::with(StrategyId::new())),
        );
        let template = handler
            .handle(GetFundTemplateQuery { group_id })
            .await
            .unwrap();

        assert_eq!(template.interest_method_options.len(), 2);
        assert_eq!(template.charge_applies_to_options.len(), 2);
        assert_eq!(template.charge_time_options.len(), 5);
        assert_eq!(template.charge_calculation_options.len(), 5);
        assert_eq!(template.transaction_processing_strategy_options.len(), 1);
    }

    #[tokio::test]
    async fn unknown_group_is_rejected() {
        let handler = GetFundTemplateHandler::new(
            Arc::new(MockGroupRepository::empty()),
            Arc::new(MockStrategyRepository::empty()),
        );
        let err = handler
            .handle(GetFundTemplateQuery {
                group_id: GroupId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message_code, "group.not.found");
    }
}
