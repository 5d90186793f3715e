//! ShareOutCycleHandler - Command handler for computing a cycle share-out.
//!
//! Share-out math (splitting the fund totals across members by their share
//! counts) is not built yet. The handler still enforces the status gate so
//! clients get the right error for the right problem.

use std::sync::Arc;

use crate::application::handlers::common::{
    cycle_not_found, invalid_cycle_status, resolve_savings_group,
};
use crate::domain::foundation::{CycleStatus, DomainError, GroupId};
use crate::ports::{CycleRepository, GroupRepository};

/// Command to share out the latest cycle of a group.
#[derive(Debug, Clone)]
pub struct ShareOutCycleCommand {
    pub group_id: GroupId,
}

/// Handler for the cycle share-out.
pub struct ShareOutCycleHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
}

impl ShareOutCycleHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
        }
    }

    pub async fn handle(&self, cmd: ShareOutCycleCommand) -> Result<(), DomainError> {
        // 1. Resolve the group; only savings groups run cycles
        resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. Only an Active cycle can be shared out
        let cycle = self
            .cycle_repository
            .find_latest_by_group(&cmd.group_id)
            .await?
            .ok_or_else(cycle_not_found)?;
        if cycle.status() != CycleStatus::Active {
            return Err(invalid_cycle_status());
        }

        Err(DomainError::not_supported(
            "Share-out computation is not supported yet",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;

    fn handler(
        groups: MockGroupRepository,
        cycles: MockCycleRepository,
    ) -> ShareOutCycleHandler {
        ShareOutCycleHandler::new(Arc::new(groups), Arc::new(cycles))
    }

    #[tokio::test]
    async fn active_cycle_share_out_is_not_supported_yet() {
        let group_id = GroupId::new();
        let handler = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(active_cycle(group_id)),
        );

        let err = handler
            .handle(ShareOutCycleCommand { group_id })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotSupported);
    }

    #[tokio::test]
    async fn initiated_cycle_fails_the_status_gate_first() {
        let group_id = GroupId::new();
        let handler = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(initiated_cycle(group_id)),
        );

        let err = handler
            .handle(ShareOutCycleCommand { group_id })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "cycle.invalid.request.based.on.status");
    }
}
