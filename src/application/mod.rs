//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Cycle handlers
    ActivateCycleCommand, ActivateCycleHandler, ActivateCycleResult,
    CreateCycleCommand, CreateCycleHandler, CreateCycleResult,
    GetCycleTemplateHandler, GetCycleTemplateQuery, GetLatestCycleHandler, GetLatestCycleQuery,
    ShareOutCloseCycleCommand, ShareOutCloseCycleHandler, ShareOutCloseCycleResult,
    ShareOutCycleCommand, ShareOutCycleHandler,
    UpdateCycleCommand, UpdateCycleHandler, UpdateCycleResult,
    // Fund handlers
    CreateFundCommand, CreateFundHandler, CreateFundResult,
    DeleteFundCommand, DeleteFundHandler, DeleteFundResult,
    GetFundHandler, GetFundQuery, GetFundTemplateHandler, GetFundTemplateQuery, ListFundsQuery,
    UpdateFundCommand, UpdateFundHandler, UpdateFundResult,
};
