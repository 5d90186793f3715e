//! ActivateCycleHandler - Command handler for activating the latest cycle.

use std::sync::Arc;

use crate::application::handlers::common::{
    cycle_not_found, invalid_cycle_status, resolve_savings_group,
};
use crate::domain::cycle::{validate_activation, CycleActivationPayload, CycleChanges};
use crate::domain::foundation::{CycleId, CycleStatus, DomainError, GroupId};
use crate::ports::{CycleRepository, GroupRepository, MeetingCalendar};

/// Command to activate the latest cycle of a group.
#[derive(Debug, Clone)]
pub struct ActivateCycleCommand {
    pub group_id: GroupId,
    pub payload: CycleActivationPayload,
}

/// Result of successful cycle activation.
#[derive(Debug, Clone)]
pub struct ActivateCycleResult {
    pub cycle_id: CycleId,
    pub changes: CycleChanges,
}

/// Handler for activating cycles.
pub struct ActivateCycleHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    meeting_calendar: Arc<dyn MeetingCalendar>,
}

impl ActivateCycleHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        meeting_calendar: Arc<dyn MeetingCalendar>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
            meeting_calendar,
        }
    }

    pub async fn handle(
        &self,
        cmd: ActivateCycleCommand,
    ) -> Result<ActivateCycleResult, DomainError> {
        // 1. Resolve the group; only savings groups run cycles
        let group = resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. The latest cycle must exist and still be Initiated
        let mut cycle = self
            .cycle_repository
            .find_latest_by_group(&cmd.group_id)
            .await?
            .ok_or_else(cycle_not_found)?;
        if cycle.status() != CycleStatus::Initiated {
            return Err(invalid_cycle_status());
        }

        // 3. Validate the payload
        let start_date = validate_activation(&cmd.payload)?;

        // 4. The actual start date must be a meeting date after activation
        if start_date < group.activation_date {
            return Err(DomainError::invalid_request(
                "cycle.startdate.should.be.after.group.activation.date",
                "Cycle start date should be after group activation date",
            ));
        }
        let recurrence = self
            .meeting_calendar
            .recurrence_for_group(&cmd.group_id)
            .await?
            .ok_or_else(|| {
                DomainError::invalid_state(
                    "meeting.not.setup",
                    "Request is not valid because meeting calendar is not attached to group",
                )
            })?;
        if !recurrence.occurs_on(start_date) {
            return Err(DomainError::invalid_request(
                "cycle.startdate.is.not.valid.meeting.date",
                "Start Date param is not a valid meeting recurrence date",
            ));
        }
        if cycle.expected_end_date() <= start_date {
            return Err(DomainError::invalid_request(
                "enddate.should.be.after.startdate",
                "Cycle End Date should be after Cycle Start Date",
            ));
        }

        // 5. Activate and persist
        let changes = cycle.activate(start_date)?;
        self.cycle_repository.update(&cycle).await?;

        tracing::info!(
            group_id = %cmd.group_id,
            cycle_id = %cycle.id(),
            %start_date,
            "savings group cycle activated"
        );

        Ok(ActivateCycleResult {
            cycle_id: cycle.id(),
            changes,
        })
    }
}
