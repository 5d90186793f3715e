//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed repositories and readers

pub mod postgres;

pub use postgres::{
    PostgresCurrencyRepository, PostgresCycleReader, PostgresCycleRepository, PostgresFundReader,
    PostgresFundRepository, PostgresGroupRepository, PostgresMeetingCalendar,
    PostgresStrategyRepository,
};
