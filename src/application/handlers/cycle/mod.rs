//! Cycle command and query handlers.
//!
//! Handlers for cycle lifecycle operations and queries.

// Command handlers
mod activate_cycle;
mod create_cycle;
mod share_out_close_cycle;
mod share_out_cycle;
mod update_cycle;

// Query handlers
mod get_cycle;
mod get_cycle_template;

pub use activate_cycle::{ActivateCycleCommand, ActivateCycleHandler, ActivateCycleResult};
pub use create_cycle::{CreateCycleCommand, CreateCycleHandler, CreateCycleResult};
pub use get_cycle::{GetLatestCycleHandler, GetLatestCycleQuery};
pub use get_cycle_template::{CycleTemplate, GetCycleTemplateHandler, GetCycleTemplateQuery};
pub use share_out_close_cycle::{
    ShareOutCloseCycleCommand, ShareOutCloseCycleHandler, ShareOutCloseCycleResult,
};
pub use share_out_cycle::{ShareOutCycleCommand, ShareOutCycleHandler};
pub use update_cycle::{UpdateCycleCommand, UpdateCycleHandler, UpdateCycleResult};
