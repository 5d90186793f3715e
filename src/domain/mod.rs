//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `calendar` - Meeting recurrence and occurrence math
//! - `cycle` - Savings-group cycle aggregate and lifecycle management
//! - `fund` - Savings-group fund aggregate, charges and loan terms

pub mod calendar;
pub mod cycle;
pub mod foundation;
pub mod fund;
