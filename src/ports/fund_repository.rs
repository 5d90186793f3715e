//! Fund repository port (write side).
//!
//! Defines the contract for persisting and retrieving SavingsGroupFund
//! aggregates, including their loan-product detail and charges.

use async_trait::async_trait;

use crate::domain::foundation::{CycleId, DomainError, FundId};
use crate::domain::fund::SavingsGroupFund;

/// Repository port for SavingsGroupFund aggregate persistence.
#[async_trait]
pub trait FundRepository: Send + Sync {
    /// Save a new fund with its loan-product detail and charges.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, fund: &SavingsGroupFund) -> Result<(), DomainError>;

    /// Update an existing fund.
    ///
    /// # Errors
    ///
    /// - `FundNotFound` if the fund doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, fund: &SavingsGroupFund) -> Result<(), DomainError>;

    /// Save a batch of funds in one transaction.
    ///
    /// Either every fund is persisted or none is.
    async fn save_all(&self, funds: &[SavingsGroupFund]) -> Result<(), DomainError>;

    /// Find a fund by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &FundId) -> Result<Option<SavingsGroupFund>, DomainError>;

    /// List every fund of a cycle, active and inactive.
    async fn list_by_cycle(&self, cycle_id: &CycleId)
        -> Result<Vec<SavingsGroupFund>, DomainError>;

    /// List the active funds of a cycle.
    async fn find_active_by_cycle(
        &self,
        cycle_id: &CycleId,
    ) -> Result<Vec<SavingsGroupFund>, DomainError>;
}
