//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Write Ports
//!
//! - `CycleRepository` - SavingsGroupCycle aggregate persistence
//! - `FundRepository` - SavingsGroupFund aggregate persistence
//!
//! ## Lookup Ports
//!
//! - `GroupRepository` - Group resolution for cycle and fund commands
//! - `StrategyRepository` - Transaction-processing strategy lookup
//! - `CurrencyRepository` - Allowed-currency lookup for templates
//! - `MeetingCalendar` - Group meeting schedule lookup
//!
//! ## Read Ports
//!
//! - `CycleReader` - Cycle views for API responses
//! - `FundReader` - Fund views for API responses

mod currency_repository;
mod cycle_reader;
mod cycle_repository;
mod fund_reader;
mod fund_repository;
mod group_repository;
mod meeting_calendar;
mod strategy_repository;

pub use currency_repository::{CurrencyOption, CurrencyRepository};
pub use cycle_reader::{CycleReader, CycleView};
pub use cycle_repository::CycleRepository;
pub use fund_reader::{FundChargeView, FundLoanProductView, FundReader, FundView};
pub use fund_repository::FundRepository;
pub use group_repository::{GroupRecord, GroupRepository};
pub use meeting_calendar::MeetingCalendar;
pub use strategy_repository::{StrategyRepository, TransactionProcessingStrategy};
