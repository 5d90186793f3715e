//! Meeting calendar port.
//!
//! The platform's calendar module owns group meeting schedules. Cycle
//! commands only need the recurrence attached to a group, as pure data the
//! domain can run occurrence math on.

use async_trait::async_trait;

use crate::domain::calendar::MeetingRecurrence;
use crate::domain::foundation::{DomainError, GroupId};

/// Lookup port for group meeting schedules.
#[async_trait]
pub trait MeetingCalendar: Send + Sync {
    /// The meeting recurrence attached to a group.
    ///
    /// Returns `None` when the group has no meeting calendar set up.
    async fn recurrence_for_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<MeetingRecurrence>, DomainError>;
}
