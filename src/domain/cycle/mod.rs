//! Cycle module - Savings-group cycle aggregate and lifecycle management.
//!
//! A cycle is one run of a savings group: Initiated while terms and funds are
//! configured, Active while the group meets, Closed after share-out.

mod aggregate;
mod changes;
mod validator;

pub use aggregate::SavingsGroupCycle;
pub use changes::CycleChanges;
pub use validator::{
    validate_activation, validate_close, validate_cycle_update, validate_new_cycle,
    CycleActivationPayload, CycleClosePayload, CyclePayload, CycleUpdate, NewCycleTerms,
};
