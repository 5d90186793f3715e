//! Savings Groups - cycle and fund lifecycle engine
//!
//! This crate manages the operating cycles of savings groups and the funds
//! each cycle runs, from cycle creation through activation to share-out close.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
