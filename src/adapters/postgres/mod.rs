//! PostgreSQL adapters.
//!
//! Implementations of the repository and reader ports backed by sqlx.
//! Statuses and coded values persist as integer code columns and round-trip
//! through the domain's `from_code` constructors.

mod calendar_repository;
mod codes;
mod currency_repository;
mod cycle_reader;
mod cycle_repository;
mod fund_reader;
mod fund_repository;
mod group_repository;
mod strategy_repository;

pub use calendar_repository::PostgresMeetingCalendar;
pub use currency_repository::PostgresCurrencyRepository;
pub use cycle_reader::PostgresCycleReader;
pub use cycle_repository::PostgresCycleRepository;
pub use fund_reader::PostgresFundReader;
pub use fund_repository::PostgresFundRepository;
pub use group_repository::PostgresGroupRepository;
pub use strategy_repository::PostgresStrategyRepository;
