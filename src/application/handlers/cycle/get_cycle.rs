//! GetLatestCycleHandler - Query handler for the latest cycle of a group.

use std::sync::Arc;

use crate::application::handlers::common::{cycle_not_found, resolve_savings_group};
use crate::domain::foundation::{DomainError, GroupId};
use crate::ports::{CycleReader, CycleView, GroupRepository};

/// Query for the latest cycle of a group.
#[derive(Debug, Clone)]
pub struct GetLatestCycleQuery {
    pub group_id: GroupId,
}

/// Handler for latest-cycle queries.
pub struct GetLatestCycleHandler {
    group_repository: Arc<dyn GroupRepository>,
    cycle_reader: Arc<dyn CycleReader>,
}

impl GetLatestCycleHandler {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        cycle_reader: Arc<dyn CycleReader>,
    ) -> Self {
        Self {
            group_repository,
            cycle_reader,
        }
    }

    pub async fn handle(&self, query: GetLatestCycleQuery) -> Result<CycleView, DomainError> {
        resolve_savings_group(self.group_repository.as_ref(), &query.group_id).await?;
        self.cycle_reader
            .get_latest_by_group(&query.group_id)
            .await?
            .ok_or_else(cycle_not_found)
    }
}
