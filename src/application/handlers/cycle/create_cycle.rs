//! CreateCycleHandler - Command handler for starting a new savings-group cycle.

use std::sync::Arc;

use crate::application::handlers::common::{invalid_cycle_status, resolve_savings_group};
use crate::domain::cycle::{validate_new_cycle, CyclePayload, SavingsGroupCycle};
use crate::domain::foundation::DomainError;
use crate::ports::{CycleRepository, FundRepository, GroupRepository, MeetingCalendar};

/// Command to create a new cycle for a group.
#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    /// Group to create the cycle for.
    pub group_id: crate::domain::foundation::GroupId,
    /// Raw request payload.
    pub payload: CyclePayload,
}

/// Result of successful cycle creation.
#[derive(Debug, Clone)]
pub struct CreateCycleResult {
    /// The created cycle.
    pub cycle: SavingsGroupCycle,
    /// Number of funds copied over from the previous cycle.
    pub funds_copied: usize,
}

/// Handler for creating cycles.
pub struct CreateCycleHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    fund_repository: Arc<dyn FundRepository>,
    meeting_calendar: Arc<dyn MeetingCalendar>,
}

impl CreateCycleHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        fund_repository: Arc<dyn FundRepository>,
        meeting_calendar: Arc<dyn MeetingCalendar>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
            fund_repository,
            meeting_calendar,
        }
    }

    pub async fn handle(&self, cmd: CreateCycleCommand) -> Result<CreateCycleResult, DomainError> {
        // 1. Resolve the group; only savings groups run cycles
        let group = resolve_savings_group(self.group_repository.as_ref(), &cmd.group_id).await?;

        // 2. The previous cycle, if any, must be closed
        let latest = self
            .cycle_repository
            .find_latest_by_group(&cmd.group_id)
            .await?;
        if let Some(latest) = &latest {
            if !latest.status().is_closed() {
                return Err(invalid_cycle_status());
            }
        }

        // 3. Validate the payload into concrete terms
        let copy_funds = cmd.payload.copy_funds_from_previous_cycle.unwrap_or(false);
        let terms = validate_new_cycle(&cmd.payload)?;
        if terms.is_share_based {
            return Err(DomainError::not_supported(
                "Share product setup for share based cycles is not supported",
            ));
        }

        // 4. Both cycle dates must land on group meeting dates
        if terms.start_date < group.activation_date {
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
                DomainError::invalid_request(
                    "meeting.not.setup",
                    "Request is not valid because meeting calendar is not attached to group",
                )
            })?;
        if !recurrence.occurs_on(terms.start_date) {
            return Err(DomainError::invalid_request(
                "cycle.startdate.is.not.valid.meeting.date",
                "Start Date param is not a valid meeting recurrence date",
            ));
        }
        if !recurrence.occurs_on(terms.end_date) {
            return Err(DomainError::invalid_request(
                "cycle.enddate.is.not.valid.meeting.date",
                "End Date param is not a valid meeting recurrence date",
            ));
        }
        if terms.end_date < terms.start_date {
            return Err(DomainError::invalid_request(
                "enddate.should.be.after.startdate",
                "Cycle End Date should be after Cycle Start Date",
            ));
        }

        // 5. Both ends are meeting dates, so the count includes them
        let expected_num_of_meetings = recurrence.expected_meetings(terms.start_date, terms.end_date);

        // 6. Create and persist the cycle
        let cycle_number = latest.as_ref().map(|c| c.cycle_number() + 1).unwrap_or(1);
        let cycle = SavingsGroupCycle::new(cmd.group_id, cycle_number, terms, expected_num_of_meetings);
        self.cycle_repository.save(&cycle).await?;

        // 7. Carry the previous cycle's active funds over when asked to
        let mut funds_copied = 0;
        if copy_funds {
            if let Some(previous) = &latest {
                let copies: Vec<_> = self
                    .fund_repository
                    .find_active_by_cycle(&previous.id())
                    .await?
                    .iter()
                    .map(|fund| fund.copy_for_cycle(cycle.id()))
                    .collect();
                if !copies.is_empty() {
                    self.fund_repository.save_all(&copies).await?;
                    funds_copied = copies.len();
                }
            }
        }

        tracing::info!(
            group_id = %cmd.group_id,
            cycle_id = %cycle.id(),
            cycle_number,
            funds_copied,
            "savings group cycle created"
        );

        Ok(CreateCycleResult {
            cycle,
            funds_copied,
        })
    }
}
