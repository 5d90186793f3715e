//! CreateFundHandler - Command handler for adding a fund to the latest cycle.

use std::sync::Arc;

use crate::application::handlers::common::{invalid_cycle_status, resolve_savings_group};
use crate::domain::foundation::{CycleStatus, DomainError, ErrorCode, GroupId};
use crate::domain::fund::{validate_new_fund, FundPayload, SavingsGroupFund};
use crate::ports::{CycleRepository, FundRepository, GroupRepository, StrategyRepository};

/// Command to create a fund in the latest cycle of a group.
#[derive(Debug, Clone)]
pub struct CreateFundCommand {
    pub group_id: GroupId,
    pub payload: FundPayload,
}

/// Result of successful fund creation.
#[derive(Debug, Clone)]
pub struct CreateFundResult {
    /// The created fund.
    pub fund: SavingsGroupFund,
}

/// Handler for creating funds.
pub struct CreateFundHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    fund_repository: Arc<dyn FundRepository>,
    strategy_repository: Arc<dyn StrategyRepository>,
}

impl CreateFundHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        fund_repository: Arc<dyn FundRepository>,
        strategy_repository: Arc<dyn StrategyRepository>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
            fund_repository,
            strategy_repository,
        }
    }

    pub async fn handle(&self, cmd: CreateFundCommand) -> Result<CreateFundResult, DomainError> {
        // 1. Resolve the group; only savings groups carry funds
        resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. Funds are set up while the latest cycle is still Initiated
        let cycle = self
            .cycle_repository
            .find_latest_by_group(&cmd.group_id)
            .await?;
        let cycle = match cycle {
            Some(cycle) if cycle.status() == CycleStatus::Initiated => cycle,
            _ => return Err(invalid_cycle_status()),
        };

        // 3. Validate the payload into concrete terms
        let terms = validate_new_fund(&cmd.payload)?;

        // 4. The referenced repayment strategy must be provisioned
        let strategy_id = terms.loan_product.transaction_processing_strategy_id;
        if self
            .strategy_repository
            .find_by_id(&strategy_id)
            .await?
            .is_none()
        {
            return Err(DomainError::new(
                ErrorCode::StrategyNotFound,
                "strategy.not.found",
                format!(
                    "Transaction processing strategy with id {} not found",
                    strategy_id
                ),
            ));
        }

        // 5. Create and persist
        let fund = SavingsGroupFund::new(cmd.group_id, cycle.id(), terms);
        self.fund_repository.save(&fund).await?;

        tracing::info!(
            group_id = %cmd.group_id,
            cycle_id = %cycle.id(),
            fund_id = %fund.id(),
            "savings group fund created"
        );

        Ok(CreateFundResult { fund })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::{FundStatus, StrategyId};

    fn payload(strategy_id: StrategyId) -> FundPayload {
        FundPayload {
            name: Some("Main fund".to_string()),
            minimum_deposit_per_meeting: Some(dec("100")),
            maximum_deposit_per_meeting: Some(dec("500")),
            is_loan_limit_based_on_savings: Some(true),
            loan_limit_factor: Some(3),
            annual_nominal_interest_rate: Some(dec("24")),
            interest_method_id: Some(1),
            interest_calculated_in_period_id: Some(1),
            repay_every: Some(1),
            repayment_period_frequency_id: Some(1),
            number_of_repayments: Some(12),
            amortization_method_id: Some(1),
            transaction_processing_strategy_id: Some(strategy_id),
            ..Default::default()
        }
    }

    fn handler(
        groups: MockGroupRepository,
        cycles: MockCycleRepository,
        strategies: MockStrategyRepository,
    ) -> (CreateFundHandler, Arc<MockFundRepository>) {
        let funds = Arc::new(MockFundRepository::new());
        let handler = CreateFundHandler::new(
            Arc::new(groups),
            Arc::new(cycles),
            funds.clone(),
            Arc::new(strategies),
        );
        (handler, funds)
    }

    #[tokio::test]
    async fn creates_fund_in_initiated_cycle() {
        let group_id = GroupId::new();
        let strategy_id = StrategyId::new();
        let (handler, funds) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(initiated_cycle(group_id)),
            MockStrategyRepository::with(strategy_id),
        );

        let result = handler
            .handle(CreateFundCommand {
                group_id,
                payload: payload(strategy_id),
            })
            .await
            .unwrap();

        assert_eq!(result.fund.name(), "Main fund");
        assert_eq!(result.fund.status(), FundStatus::Active);
        assert_eq!(funds.stored().len(), 1);
    }

    #[tokio::test]
    async fn active_cycle_blocks_fund_creation() {
        let group_id = GroupId::new();
        let strategy_id = StrategyId::new();
        let (handler, _) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(active_cycle(group_id)),
            MockStrategyRepository::with(strategy_id),
        );

        let err = handler
            .handle(CreateFundCommand {
                group_id,
                payload: payload(strategy_id),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "cycle.invalid.request.based.on.status");
    }

    #[tokio::test]
    async fn group_without_any_cycle_is_rejected() {
        let group_id = GroupId::new();
        let strategy_id = StrategyId::new();
        let (handler, _) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::new(),
            MockStrategyRepository::with(strategy_id),
        );

        let err = handler
            .handle(CreateFundCommand {
                group_id,
                payload: payload(strategy_id),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "cycle.invalid.request.based.on.status");
    }

    #[tokio::test]
    async fn unknown_strategy_is_rejected() {
        let group_id = GroupId::new();
        let (handler, funds) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(initiated_cycle(group_id)),
            MockStrategyRepository::empty(),
        );

        let err = handler
            .handle(CreateFundCommand {
                group_id,
                payload: payload(StrategyId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "strategy.not.found");
        assert!(funds.stored().is_empty());
    }
}
