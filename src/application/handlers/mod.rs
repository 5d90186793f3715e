//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod cycle;
pub mod fund;

mod common;

#[cfg(test)]
pub(crate) mod test_support;

pub use cycle::{
    ActivateCycleCommand, ActivateCycleHandler, ActivateCycleResult, CreateCycleCommand,
    CreateCycleHandler, CreateCycleResult, CycleTemplate, GetCycleTemplateHandler,
    GetCycleTemplateQuery, GetLatestCycleHandler, GetLatestCycleQuery, ShareOutCloseCycleCommand,
    ShareOutCloseCycleHandler, ShareOutCloseCycleResult, ShareOutCycleCommand,
    ShareOutCycleHandler, UpdateCycleCommand, UpdateCycleHandler, UpdateCycleResult,
};
pub use fund::{
    CreateFundCommand, CreateFundHandler, CreateFundResult, DeleteFundCommand, DeleteFundHandler,
    DeleteFundResult, FundTemplate, GetFundHandler, GetFundQuery, GetFundTemplateHandler,
    GetFundTemplateQuery, ListFundsQuery, UpdateFundCommand, UpdateFundHandler, UpdateFundResult,
};
