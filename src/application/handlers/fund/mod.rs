//! Fund command and query handlers.
//!
//! Handlers for fund lifecycle operations and queries.

// Command handlers
mod create_fund;
mod delete_fund;
mod update_fund;

// Query handlers
mod get_fund;
mod get_fund_template;

pub use create_fund::{CreateFundCommand, CreateFundHandler, CreateFundResult};
pub use delete_fund::{DeleteFundCommand, DeleteFundHandler, DeleteFundResult};
pub use get_fund::{GetFundHandler, GetFundQuery, ListFundsQuery};
pub use get_fund_template::{FundTemplate, GetFundTemplateHandler, GetFundTemplateQuery};
pub use update_fund::{UpdateFundCommand, UpdateFundHandler, UpdateFundResult};
