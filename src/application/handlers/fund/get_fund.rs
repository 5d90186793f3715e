//! Fund query handlers.

use std::sync::Arc;

use crate::application::handlers::common::{cycle_not_found, resolve_savings_group};
use crate::domain::foundation::{DomainError, ErrorCode, FundId, GroupId};
use crate::ports::{CycleRepository, FundReader, FundView, GroupRepository};

/// Query for one fund.
#[derive(Debug, Clone)]
pub struct GetFundQuery {
    pub group_id: GroupId,
    pub fund_id: FundId,
}

/// Query for every fund of the latest cycle of a group.
#[derive(Debug, Clone)]
pub struct ListFundsQuery {
    pub group_id: GroupId,
}

/// Handler for fund queries.
pub struct GetFundHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    fund_reader: Arc<dyn FundReader>,
}

impl GetFundHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        fund_reader: Arc<dyn FundReader>,
    ) -> Self {
        Self {
            group_repository,
            cycle_repository,
            fund_reader,
        }
    }

    pub async fn handle(&self, query: GetFundQuery) -> Result<FundView, DomainError> {
        resolve_savings_group(self.group_repository.as_ref(), &query.group_id).await?;
        self.fund_reader
            .get_by_id(&query.fund_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::FundNotFound,
                    "fund.not.found",
                    format!("Fund with id {} not found", query.fund_id),
                )
            })
    }

    /// Lists the funds of the group's latest cycle.
    pub async fn handle_list(&self, query: ListFundsQuery) -> Result<Vec<FundView>, DomainError> {
        resolve_savings_group(self.group_repository.as_ref(), &query.group_id).await?;
        let cycle = self
            .cycle_repository
            .find_latest_by_group(&query.group_id)
            .await?
            .ok_or_else(cycle_not_found)?;
        self.fund_reader.list_by_cycle(&cycle.id()).await
    }
}
