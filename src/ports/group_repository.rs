//! Group lookup port.
//!
//! Savings groups are owned by the wider platform; cycle and fund commands
//! only need to resolve a group and check its type and activation date.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, GroupId, GroupType};

/// Minimal read model of a group, as seen by cycle and fund commands.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub id: GroupId,
    pub group_type: GroupType,
    pub activation_date: NaiveDate,
}

/// Lookup port for groups.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<GroupRecord>, DomainError>;
}
