//! UpdateCycleHandler - Command handler for editing an Initiated cycle.

use std::sync::Arc;

use crate::application::handlers::common::{
    cycle_not_found, invalid_cycle_status, meeting_not_setup, resolve_savings_group,
};
use crate::domain::cycle::{validate_cycle_update, CycleChanges, CyclePayload};
use crate::domain::foundation::{CycleId, CycleStatus, DomainError, GroupId};
use crate::ports::{CycleRepository, GroupRepository, MeetingCalendar};

/// Command to update the latest cycle of a group.
#[derive(Debug, Clone)]
pub struct UpdateCycleCommand {
    pub group_id: GroupId,
    pub payload: CyclePayload,
}

/// Result of a successful cycle update.
#[derive(Debug, Clone)]
pub struct UpdateCycleResult {
    pub cycle_id: CycleId,
    pub changes: CycleChanges,
}

/// Handler for updating cycles.
pub struct UpdateCycleHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    meeting_calendar: Arc<dyn MeetingCalendar>,
}

impl UpdateCycleHandler {
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

    pub async fn handle(&self, cmd: UpdateCycleCommand) -> Result<UpdateCycleResult, DomainError> {
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

        // 3. Validate the payload into a field update
        let update = validate_cycle_update(&cmd.payload)?;
        if update.is_share_based == Some(true) {
            return Err(DomainError::not_supported(
                "Share product setup for share based cycles is not supported",
            ));
        }

        // 4. When either date moves, re-check the schedule and recount meetings
        let mut expected_num_of_meetings = None;
        if update.start_date.is_some() || update.end_date.is_some() {
            let start_date = update.start_date.unwrap_or_else(|| cycle.expected_start_date());
            let end_date = update.end_date.unwrap_or_else(|| cycle.expected_end_date());

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
                .ok_or_else(meeting_not_setup)?;
            if update.start_date.is_some() && !recurrence.occurs_on(start_date) {
                return Err(DomainError::invalid_request(
                    "cycle.startdate.is.not.valid.meeting.date",
                    "Start Date param is not a valid meeting recurrence date",
                ));
            }
            if update.end_date.is_some() && !recurrence.occurs_on(end_date) {
                return Err(DomainError::invalid_request(
                    "cycle.enddate.is.not.valid.meeting.date",
                    "End Date param is not a valid meeting recurrence date",
                ));
            }
            if end_date <= start_date {
                return Err(DomainError::invalid_request(
                    "enddate.should.be.after.startdate",
                    "Cycle End Date should be after Cycle Start Date",
                ));
            }

            expected_num_of_meetings = Some(recurrence.expected_meetings(start_date, end_date));
        }

        // 5. Apply and persist only when something moved
        let changes = cycle.apply_update(update, expected_num_of_meetings)?;
        if !changes.is_empty() {
            self.cycle_repository.update(&cycle).await?;
        }

        tracing::info!(
            group_id = %cmd.group_id,
            cycle_id = %cycle.id(),
            "savings group cycle updated"
        );

        Ok(UpdateCycleResult {
            cycle_id: cycle.id(),
            changes,
        })
    }
}
