//! Configuration loading and management for the DSA engine.
//!
//! This module loads the published rate table together with the
//! organization's DSA policy (meal boundary times and edge-case handling).
//!
//! # Example
//!
//! ```no_run
//! use dsa_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/dsa_2025").unwrap();
//! println!("Loaded table: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DateRangePolicy, DepartureBoundaries, DsaConfig, DsaPolicy, NegativeNetPolicy,
    RateTableMetadata, ReturnBoundaries,
};
