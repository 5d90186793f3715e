//! Checks shared by cycle and fund handlers.

use crate::domain::foundation::{DomainError, ErrorCode, GroupId};
use crate::ports::{GroupRecord, GroupRepository};

/// Resolves a group and rejects the request when it is not a savings group.
pub(crate) async fn resolve_savings_group(
    repository: &dyn GroupRepository,
    group_id: &GroupId,
) -> Result<GroupRecord, DomainError> {
    let group = repository.find_by_id(group_id).await?.ok_or_else(|| {
        DomainError::new(
            ErrorCode::GroupNotFound,
            "group.not.found",
            format!("Group with id {} not found", group_id),
        )
    })?;
    if !group.group_type.is_savings() {
        return Err(DomainError::invalid_request(
            "not.savings.group",
            "Requested service is not valid for groups that are not of groupType.SAVINGS",
        ));
    }
    Ok(group)
}

pub(crate) fn cycle_not_found() -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, "cycle.not.found", "Cycle not found")
}

pub(crate) fn invalid_cycle_status() -> DomainError {
    DomainError::invalid_state(
        "cycle.invalid.request.based.on.status",
        "Request is not valid because of current savings group cycle status",
    )
}

pub(crate) fn invalid_fund_status() -> DomainError {
    DomainError::invalid_state(
        "fund.invalid.request.based.on.status",
        "Request is not valid because of current savings group fund status",
    )
}

pub(crate) fn meeting_not_setup() -> DomainError {
    DomainError::invalid_request(
        "meeting.not.setup",
        "Request is not valid because meeting calendar is not attached to group",
    )
}
