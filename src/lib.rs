//! Daily Subsistence Allowance engine
//!
//! This crate computes the Daily Subsistence Allowance (DSA) owed to a
//! traveler for a mission from a published per-country, per-area rate table,
//! the departure and return date-times, and the meals provided during the
//! stay. It also keeps the mission list, numbers travel authorizations, codes
//! expense lines and totals meeting authorisations, all behind an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
