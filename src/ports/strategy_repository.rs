//! Transaction-processing strategy lookup port.
//!
//! Strategies describe the order loan repayments are applied in. They are
//! provisioned by the platform; funds and cycles only reference them.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, StrategyId};

/// A transaction-processing strategy as provisioned by the platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProcessingStrategy {
    pub id: StrategyId,
    pub code: String,
    pub name: String,
}

/// Lookup port for transaction-processing strategies.
#[async_trait]
pub trait StrategyRepository: Send + Sync {
    /// Find a strategy by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &StrategyId,
    ) -> Result<Option<TransactionProcessingStrategy>, DomainError>;

    /// List every provisioned strategy, for template responses.
    async fn list_all(&self) -> Result<Vec<TransactionProcessingStrategy>, DomainError>;
}
