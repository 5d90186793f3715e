//! DeleteFundHandler - Command handler for retiring a fund.
//!
//! Funds are never hard-deleted; they flip to Inactive and stop being copied
//! into later cycles. Only possible while the owning cycle is Initiated.

use std::sync::Arc;

use crate::application::handlers::common::{
    cycle_not_found, invalid_cycle_status, invalid_fund_status, resolve_savings_group,
};
use crate::domain::foundation::{CycleStatus, DomainError, ErrorCode, FundId, GroupId};
use crate::domain::fund::FundChanges;
use crate::ports::{CycleRepository, FundRepository, GroupRepository};

/// Command to retire a fund.
#[derive(Debug, Clone)]
pub struct DeleteFundCommand {
    pub group_id: GroupId,
    pub fund_id: FundId,
}

/// Result of a successful fund retirement.
#[derive(Debug, Clone)]
pub struct DeleteFundResult {
    pub fund_id: FundId,
    pub changes: FundChanges,
}

/// Handler for retiring funds.
pub struct DeleteFundHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    fund_repository: Arc<dyn FundRepository>,
}

impl DeleteFundHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        fund_repository: Arc<dyn FundRepository>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
            fund_repository,
        }
    }

    pub async fn handle(&self, cmd: DeleteFundCommand) -> Result<DeleteFundResult, DomainError> {
        // 1. Resolve the group; only savings groups carry funds
        resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. The fund must exist and belong to the group
        let mut fund = self
            .fund_repository
            .find_by_id(&cmd.fund_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::FundNotFound,
                    "fund.not.found",
                    format!("Fund with id {} not found", cmd.fund_id),
                )
            })?;
        if fund.group_id() != cmd.group_id {
            return Err(DomainError::invalid_request(
                "fund.does.not.belong.to.group",
                "Requested Fund Id is not associated with given Group Id",
            ));
        }

        // 3. Only an Initiated cycle allows retiring an active fund
        let cycle = self
            .cycle_repository
            .find_by_id(&fund.cycle_id())
            .await?
            .ok_or_else(cycle_not_found)?;
        if cycle.status() != CycleStatus::Initiated {
            return Err(invalid_cycle_status());
        }
        if !fund.status().is_active() {
            return Err(invalid_fund_status());
        }

        // 4. Deactivate and persist
        let changes = fund.deactivate()?;
        self.fund_repository.update(&fund).await?;

        tracing::info!(
            group_id = %cmd.group_id,
            fund_id = %fund.id(),
            "savings group fund retired"
        );

        Ok(DeleteFundResult {
            fund_id: fund.id(),
            changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::{FundStatus, StrategyId};
    use crate::domain::fund::SavingsGroupFund;

    fn fixture(
        cycle_status: CycleStatus,
    ) -> (GroupId, FundId, DeleteFundHandler, Arc<MockFundRepository>) {
        let group_id = GroupId::new();
        let cycle = match cycle_status {
            CycleStatus::Initiated => initiated_cycle(group_id),
            CycleStatus::Active => active_cycle(group_id),
            CycleStatus::Closed => closed_cycle(group_id),
        };
        let fund = SavingsGroupFund::new(group_id, cycle.id(), fund_terms(StrategyId::new()));
        let fund_id = fund.id();
        let funds = Arc::new(MockFundRepository::with(fund));
        let handler = DeleteFundHandler::new(
            Arc::new(MockGroupRepository::with(savings_group(group_id))),
            Arc::new(MockCycleRepository::with(cycle)),
            funds.clone(),
        );
        (group_id, fund_id, handler, funds)
    }

    #[tokio::test]
    async fn retires_fund_while_cycle_is_initiated() {
        let (group_id, fund_id, handler, funds) = fixture(CycleStatus::Initiated);

        let result = handler
            .handle(DeleteFundCommand { group_id, fund_id })
            .await
            .unwrap();

        assert_eq!(result.changes.fund_status, Some(FundStatus::Inactive));
        assert_eq!(funds.stored()[0].status(), FundStatus::Inactive);
    }

    #[tokio::test]
    async fn active_cycle_blocks_fund_retirement() {
        let (group_id, fund_id, handler, _) = fixture(CycleStatus::Active);

        let err = handler
            .handle(DeleteFundCommand { group_id, fund_id })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "cycle.invalid.request.based.on.status");
    }

    #[tokio::test]
    async fn retiring_twice_is_rejected() {
        let (group_id, fund_id, handler, _) = fixture(CycleStatus::Initiated);

        handler
            .handle(DeleteFundCommand { group_id, fund_id })
            .await
            .unwrap();
        let err = handler
            .handle(DeleteFundCommand { group_id, fund_id })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "fund.invalid.request.based.on.status");
    }
}
