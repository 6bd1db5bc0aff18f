//! Configuration types for DSA calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration files, and the assembled
//! [`DsaConfig`] that bundles them with the rate table.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::RateTable;

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Metadata about the published rate table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateTableMetadata {
    /// Human-readable name of the table.
    pub name: String,
    /// The currency all rates are expressed in.
    pub currency: String,
    /// The version or publication year of the table.
    pub version: String,
    /// Where the table was taken from.
    pub source: String,
}

/// Time-of-day boundaries for the departure day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DepartureBoundaries {
    /// Departures strictly before this time earn the full rate.
    pub full_rate_before: NaiveTime,
    /// Departures up to and including this time earn the dinner-only rate.
    pub dinner_rate_until: NaiveTime,
}

impl Default for DepartureBoundaries {
    fn default() -> Self {
        Self {
            full_rate_before: at_hour(10),
            dinner_rate_until: at_hour(14),
        }
    }
}

/// Time-of-day boundaries for the return day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnBoundaries {
    /// Returns from this time on earn at least the lunch-only rate.
    pub lunch_rate_from: NaiveTime,
    /// Returns strictly after this time earn the full rate.
    pub full_rate_after: NaiveTime,
}

impl Default for ReturnBoundaries {
    fn default() -> Self {
        Self {
            lunch_rate_from: at_hour(13),
            full_rate_after: at_hour(19),
        }
    }
}

/// What to do when the return precedes the departure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePolicy {
    /// Count the trip as one day and emit a warning.
    #[default]
    Lenient,
    /// Reject the calculation with `InvalidRange`.
    Strict,
}

/// What to do when deductions exceed the gross allowance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeNetPolicy {
    /// Keep the negative net amount and emit a warning.
    #[default]
    Allow,
    /// Floor the net amount at zero and emit a warning.
    ClampToZero,
}

/// The organization's DSA policy, loaded from `policy.yaml`.
///
/// # Example
///
/// ```
/// use dsa_engine::config::DsaPolicy;
/// use chrono::NaiveTime;
///
/// let policy = DsaPolicy::default();
/// assert_eq!(policy.departure.full_rate_before, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
/// assert_eq!(policy.return_day.full_rate_after, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DsaPolicy {
    /// Departure-day boundaries.
    #[serde(default)]
    pub departure: DepartureBoundaries,
    /// Return-day boundaries.
    #[serde(default, rename = "return")]
    pub return_day: ReturnBoundaries,
    /// Handling of inverted trip windows.
    #[serde(default)]
    pub date_range: DateRangePolicy,
    /// Handling of negative net allowances.
    #[serde(default)]
    pub negative_net: NegativeNetPolicy,
}

impl DsaPolicy {
    /// Checks that the boundaries are ordered.
    pub fn validate(&self) -> Result<(), String> {
        if self.departure.full_rate_before > self.departure.dinner_rate_until {
            return Err(format!(
                "departure.full_rate_before ({}) must not be later than departure.dinner_rate_until ({})",
                self.departure.full_rate_before, self.departure.dinner_rate_until
            ));
        }
        if self.return_day.lunch_rate_from > self.return_day.full_rate_after {
            return Err(format!(
                "return.lunch_rate_from ({}) must not be later than return.full_rate_after ({})",
                self.return_day.lunch_rate_from, self.return_day.full_rate_after
            ));
        }
        Ok(())
    }
}

/// The complete DSA configuration.
///
/// This struct aggregates the table metadata, the policy and the rate
/// table loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct DsaConfig {
    metadata: RateTableMetadata,
    policy: DsaPolicy,
    rates: RateTable,
}

impl DsaConfig {
    /// Creates a new DsaConfig from its component parts.
    pub fn new(metadata: RateTableMetadata, policy: DsaPolicy, rates: RateTable) -> Self {
        Self {
            metadata,
            policy,
            rates,
        }
    }

    /// Returns the rate table metadata.
    pub fn metadata(&self) -> &RateTableMetadata {
        &self.metadata
    }

    /// Returns the DSA policy.
    pub fn policy(&self) -> &DsaPolicy {
        &self.policy
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}
