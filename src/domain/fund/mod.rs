//! Fund module - Savings-group fund aggregate, charges and loan terms.
//!
//! A fund is one pot of money inside a cycle, with deposit bounds, a loan
//! limit, the loan terms applied to loans issued from it, and its charges.

mod aggregate;
mod changes;
mod charge;
mod loan_product_detail;
mod validator;

pub use aggregate::{FundTotals, SavingsGroupFund};
pub use changes::{FundChanges, FundChargeChange, LoanLimit};
pub use charge::{ChargeChange, FundCharge, NewChargeDef};
pub use loan_product_detail::{FundLoanProductDetail, NewLoanProductTerms};
pub use validator::{
    validate_fund_update_active, validate_fund_update_initiated, validate_new_fund, ChargePatch,
    ChargePayload, FundPayload, FundUpdate, NewFundTerms,
};
