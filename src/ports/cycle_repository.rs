//! Cycle repository port (write side).
//!
//! Defines the contract for persisting and retrieving SavingsGroupCycle
//! aggregates. Implementations handle the actual database operations.

use async_trait::async_trait;

use crate::domain::cycle::SavingsGroupCycle;
use crate::domain::foundation::{CycleId, DomainError, GroupId};

/// Repository port for SavingsGroupCycle aggregate persistence.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Save a new cycle.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, cycle: &SavingsGroupCycle) -> Result<(), DomainError>;

    /// Update an existing cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if the cycle doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, cycle: &SavingsGroupCycle) -> Result<(), DomainError>;

    /// Find a cycle by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CycleId) -> Result<Option<SavingsGroupCycle>, DomainError>;

    /// Find the latest cycle of a group, by cycle number.
    ///
    /// Returns `None` when the group has no cycle yet.
    async fn find_latest_by_group(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<SavingsGroupCycle>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CycleRepository) {}
    }
}
