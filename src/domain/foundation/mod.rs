//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, code enums, and error types
//! that form the vocabulary of the savings-group domain.

mod charge_codes;
mod currency;
mod cycle_status;
mod deposits_payment_strategy;
mod enum_option;
mod errors;
mod fund_status;
mod group_type;
mod ids;
mod loan_product_codes;

pub use charge_codes::{ChargeAppliesTo, ChargeCalculation, ChargeTime};
pub use currency::Currency;
pub use cycle_status::CycleStatus;
pub use deposits_payment_strategy::DepositsPaymentStrategy;
pub use enum_option::EnumOption;
pub use errors::{DomainError, ErrorCode, ParamError};
pub use fund_status::FundStatus;
pub use group_type::GroupType;
pub use ids::{ChargeId, CycleId, FundId, GroupId, ShareProductId, StrategyId};
pub use loan_product_codes::{
    AmortizationMethod, InterestCalculationPeriod, InterestMethod, RepaymentFrequency,
};
