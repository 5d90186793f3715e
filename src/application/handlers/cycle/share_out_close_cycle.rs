//! ShareOutCloseCycleHandler - Command handler for closing an Active cycle.

use std::sync::Arc;

use crate::application::handlers::common::{
    cycle_not_found, invalid_cycle_status, resolve_savings_group,
};
use crate::domain::cycle::{validate_close, CycleChanges, CycleClosePayload};
use crate::domain::foundation::{CycleId, CycleStatus, DomainError, GroupId};
use crate::ports::{CycleRepository, GroupRepository};

/// Command to close the latest cycle of a group after share-out.
#[derive(Debug, Clone)]
pub struct ShareOutCloseCycleCommand {
    pub group_id: GroupId,
    pub payload: CycleClosePayload,
}

/// Result of a successful cycle close.
#[derive(Debug, Clone)]
pub struct ShareOutCloseCycleResult {
    pub cycle_id: CycleId,
    pub changes: CycleChanges,
}

/// Handler for closing cycles.
pub struct ShareOutCloseCycleHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
}

impl ShareOutCloseCycleHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: ShareOutCloseCycleCommand,
    ) -> Result<ShareOutCloseCycleResult, DomainError> {
        // 1. Resolve the group; only savings groups run cycles
        resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. Only an Active cycle can be closed
        let mut cycle = self
            .cycle_repository
            .find_latest_by_group(&cmd.group_id)
            .await?
            .ok_or_else(cycle_not_found)?;
        if cycle.status() != CycleStatus::Active {
            return Err(invalid_cycle_status());
        }

        // 3. Validate the payload
        let end_date = validate_close(&cmd.payload)?;

        // 4. The cycle cannot close before its effective start
        if end_date < cycle.start_date() {
            return Err(DomainError::invalid_request(
                "cycle.enddate.should.be.after.cycle.startdate",
                "Cycle end date should be after cycle start date",
            ));
        }

        // 5. Close and persist
        let changes = cycle.close(end_date)?;
        self.cycle_repository.update(&cycle).await?;

        tracing::info!(
            group_id = %cmd.group_id,
            cycle_id = %cycle.id(),
            %end_date,
            "savings group cycle closed"
        );

        Ok(ShareOutCloseCycleResult {
            cycle_id: cycle.id(),
            changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;

    fn close(end: chrono::NaiveDate) -> CycleClosePayload {
        CycleClosePayload {
            locale: None,
            date_format: None,
            end_date: Some(end),
        }
    }

    fn handler(
        groups: MockGroupRepository,
        cycles: MockCycleRepository,
    ) -> (ShareOutCloseCycleHandler, Arc<MockCycleRepository>) {
        let cycles = Arc::new(cycles);
        let handler = ShareOutCloseCycleHandler::new(Arc::new(groups), cycles.clone());
        (handler, cycles)
    }

    #[tokio::test]
    async fn closes_active_cycle_with_actual_end_date() {
        let group_id = GroupId::new();
        let (handler, cycles) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(active_cycle(group_id)),
        );

        let result = handler
            .handle(ShareOutCloseCycleCommand {
                group_id,
                payload: close(date(2026, 1, 19)),
            })
            .await
            .unwrap();

        assert_eq!(result.changes.actual_end_date, Some(date(2026, 1, 19)));
        let stored = &cycles.stored()[0];
        assert_eq!(stored.status(), CycleStatus::Closed);
        assert_eq!(stored.actual_end_date(), Some(date(2026, 1, 19)));
    }

    #[tokio::test]
    async fn initiated_cycle_cannot_be_closed() {
        let group_id = GroupId::new();
        let (handler, _) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(initiated_cycle(group_id)),
        );

        let err = handler
            .handle(ShareOutCloseCycleCommand {
                group_id,
                payload: close(date(2026, 1, 19)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message_code, "cycle.invalid.request.based.on.status");
    }

    #[tokio::test]
    async fn end_before_the_actual_start_is_rejected() {
        let group_id = GroupId::new();
        // active_cycle starts on 2026-01-05
        let (handler, _) = handler(
            MockGroupRepository::with(savings_group(group_id)),
            MockCycleRepository::with(active_cycle(group_id)),
        );

        let err = handler
            .handle(ShareOutCloseCycleCommand {
                group_id,
                payload: close(date(2026, 1, 4)),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.message_code,
            "cycle.enddate.should.be.after.cycle.startdate"
        );
    }
}
