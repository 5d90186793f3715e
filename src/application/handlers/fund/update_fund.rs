//! UpdateFundHandler - Command handler for editing a fund.
//!
//! What may change depends on the owning cycle's status: the full schema
//! while Initiated, only name, interest rate and charge patches once Active,
//! nothing after the cycle closed.

use std::sync::Arc;

use crate::application::handlers::common::{
    cycle_not_found, invalid_cycle_status, invalid_fund_status, resolve_savings_group,
};
use crate::domain::foundation::{CycleStatus, DomainError, ErrorCode, FundId, GroupId};
use crate::domain::fund::{
    validate_fund_update_active, validate_fund_update_initiated, FundChanges, FundPayload,
};
use crate::ports::{CycleRepository, FundRepository, GroupRepository, StrategyRepository};

/// Command to update a fund.
#[derive(Debug, Clone)]
pub struct UpdateFundCommand {
    pub group_id: GroupId,
    pub fund_id: FundId,
    pub payload: FundPayload,
}

/// Result of a successful fund update.
#[derive(Debug, Clone)]
pub struct UpdateFundResult {
    pub fund_id: FundId,
    pub changes: FundChanges,
}

/// Handler for updating funds.
pub struct UpdateFundHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    fund_repository: Arc<dyn FundRepository>,
    strategy_repository: Arc<dyn StrategyRepository>,
}

impl UpdateFundHandler {
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

    pub async fn handle(&self, cmd: UpdateFundCommand) -> Result<UpdateFundResult, DomainError> {
        // 1. Resolve the group; only savings groups carry funds
        resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. The fund must exist and belong to the group
        let mut fund = self
            .fund_repository
            .find_by_id(&cmd.fund_id)
            .await?
            .ok_or_else(|| fund_not_found(&cmd.fund_id))?;
        if fund.group_id() != cmd.group_id {
            return Err(DomainError::invalid_request(
                "fund.does.not.belong.to.group",
                "Requested Fund Id is not associated with given Group Id",
            ));
        }

        // 3. A closed cycle freezes its funds; an inactive fund stays frozen
        let cycle = self
            .cycle_repository
            .find_by_id(&fund.cycle_id())
            .await?
            .ok_or_else(cycle_not_found)?;
        if cycle.status().is_closed() {
            return Err(invalid_cycle_status());
        }
        if !fund.status().is_active() {
            return Err(invalid_fund_status());
        }

        // 4. Validate against the schema the cycle status allows
        let update = if cycle.status() == CycleStatus::Initiated {
            validate_fund_update_initiated(&cmd.payload)?
        } else {
            validate_fund_update_active(&cmd.payload)?
        };

        // 5. A replacement repayment strategy must be provisioned
        if let Some(strategy_id) = update.transaction_processing_strategy_id {
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
        }

        // 6. Apply and persist only when something moved
        let changes = fund.apply_update(update)?;
        if !changes.is_empty() {
            self.fund_repository.update(&fund).await?;
        }

        tracing::info!(
            group_id = %cmd.group_id,
            fund_id = %fund.id(),
            "savings group fund updated"
        );

        Ok(UpdateFundResult {
            fund_id: fund.id(),
            changes,
        })
    }
}

fn fund_not_found(id: &FundId) -> DomainError {
    DomainError::new(
        ErrorCode::FundNotFound,
        "fund.not.found",
        format!("Fund with id {} not found", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::StrategyId;
    use crate::domain::fund::SavingsGroupFund;

    struct Fixture {
        group_id: GroupId,
        fund_id: FundId,
        handler: UpdateFundHandler,
        funds: Arc<MockFundRepository>,
    }

    fn fixture(cycle_status: CycleStatus) -> Fixture {
        let group_id = GroupId::new();
        let strategy_id = StrategyId::new();
        let cycle = match cycle_status {
            CycleStatus::Initiated => initiated_cycle(group_id),
            CycleStatus::Active => active_cycle(group_id),
            CycleStatus::Closed => closed_cycle(group_id),
        };
        let fund = SavingsGroupFund::new(group_id, cycle.id(), fund_terms(strategy_id));
        let fund_id = fund.id();

        let funds = Arc::new(MockFundRepository::with(fund));
        let handler = UpdateFundHandler::new(
            Arc::new(MockGroupRepository::with(savings_group(group_id))),
            Arc::new(MockCycleRepository::with(cycle)),
            funds.clone(),
            Arc::new(MockStrategyRepository::with(strategy_id)),
        );
        Fixture {
            group_id,
            fund_id,
            handler,
            funds,
        }
    }

    #[tokio::test]
    async fn initiated_cycle_allows_full_edits() {
        let f = fixture(CycleStatus::Initiated);

        let result = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: f.fund_id,
                payload: FundPayload {
                    minimum_deposit_per_meeting: Some(dec("150")),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(result.changes.minimum_deposit_per_meeting, Some(dec("150")));
        assert_eq!(
            f.funds.stored()[0].minimum_deposit_per_meeting(),
            dec("150")
        );
    }

    #[tokio::test]
    async fn active_cycle_restricts_the_schema() {
        let f = fixture(CycleStatus::Active);

        let err = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: f.fund_id,
                payload: FundPayload {
                    minimum_deposit_per_meeting: Some(dec("150")),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let result = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: f.fund_id,
                payload: FundPayload {
                    annual_nominal_interest_rate: Some(dec("30")),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(result.changes.annual_nominal_interest_rate, Some(dec("30")));
    }

    #[tokio::test]
    async fn closed_cycle_freezes_funds() {
        let f = fixture(CycleStatus::Closed);

        let err = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: f.fund_id,
                payload: FundPayload {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "cycle.invalid.request.based.on.status");
    }

    #[tokio::test]
    async fn fund_of_another_group_is_rejected() {
        let f = fixture(CycleStatus::Initiated);

        let other_group = GroupId::new();
        let handler = UpdateFundHandler::new(
            Arc::new(MockGroupRepository::with(savings_group(other_group))),
            Arc::new(MockCycleRepository::new()),
            f.funds.clone(),
            Arc::new(MockStrategyRepository::empty()),
        );

        let err = handler
            .handle(UpdateFundCommand {
                group_id: other_group,
                fund_id: f.fund_id,
                payload: FundPayload::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "fund.does.not.belong.to.group");
    }

    #[tokio::test]
    async fn unknown_fund_is_rejected() {
        let f = fixture(CycleStatus::Initiated);

        let err = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: FundId::new(),
                payload: FundPayload::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "fund.not.found");
    }

    #[tokio::test]
    async fn inactive_fund_cannot_be_edited() {
        let f = fixture(CycleStatus::Initiated);
        let mut fund = f.funds.stored().remove(0);
        fund.deactivate().unwrap();
        f.funds.update(&fund).await.unwrap();

        let err = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: f.fund_id,
                payload: FundPayload {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "fund.invalid.request.based.on.status");
    }

    #[tokio::test]
    async fn replacement_strategy_must_exist() {
        let f = fixture(CycleStatus::Initiated);

        let err = f
            .handler
            .handle(UpdateFundCommand {
                group_id: f.group_id,
                fund_id: f.fund_id,
                payload: FundPayload {
                    transaction_processing_strategy_id: Some(StrategyId::new()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "strategy.not.found");
    }
}
