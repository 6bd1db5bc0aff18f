//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the DSA rate
//! table and policy from a configuration directory.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateEntry, RateTable};

use super::types::{DsaConfig, DsaPolicy, RateTableMetadata};

/// One row of `rates.csv`, using the column names of the published table.
#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Area", default)]
    area: String,
    #[serde(
        rename = "Full DSA",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    full_dsa: Option<Decimal>,
    #[serde(
        rename = "Lunch only",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    lunch_only: Option<Decimal>,
    #[serde(
        rename = "Dinner only",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    dinner_only: Option<Decimal>,
}

/// Loads and provides access to DSA configuration.
///
/// # Directory Structure
///
/// ```text
/// config/dsa_2025/
/// ├── table.yaml   # Rate table metadata (name, currency, version)
/// ├── policy.yaml  # Boundary times and edge-case policies
/// └── rates.csv    # Country,Area,Full DSA,Lunch only,Dinner only
/// ```
///
/// # Example
///
/// ```no_run
/// use dsa_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dsa_2025").unwrap();
/// let rate = loader.lookup_rate("Jordan", "Amman").unwrap();
/// println!("Full DSA in Amman: {} {}", rate.full_dsa, loader.metadata().currency);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: DsaConfig,
}

impl ConfigLoader {
    /// Wraps an already assembled configuration.
    pub fn new(config: DsaConfig) -> Self {
        Self { config }
    }

    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing ([`EngineError::ConfigNotFound`]),
    /// or if any file is malformed, the policy boundaries are out of order, or
    /// the rate table is empty, has duplicates or negative rates
    /// ([`EngineError::ConfigParseError`]).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dsa_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/dsa_2025")?;
    /// # Ok::<(), dsa_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RateTableMetadata>(&path.join("table.yaml"))?;

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<DsaPolicy>(&policy_path)?;
        policy
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: policy_path.display().to_string(),
                message,
            })?;

        let rates = Self::load_rates(&path.join("rates.csv"))?;

        debug!(
            table = %metadata.name,
            entries = rates.len(),
            "Loaded DSA configuration"
        );

        Ok(Self {
            config: DsaConfig::new(metadata, policy, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads the rate table from a CSV file.
    ///
    /// Rows with a blank country are skipped, as in the published sheet where
    /// section headers and footnotes share the table.
    fn load_rates(path: &Path) -> EngineResult<RateTable> {
        let path_str = path.display().to_string();

        if !path.exists() {
            return Err(EngineError::ConfigNotFound { path: path_str });
        }

        let parse_error = |message: String| EngineError::ConfigParseError {
            path: path_str.clone(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| parse_error(e.to_string()))?;

        let mut entries = Vec::new();
        for row in reader.deserialize::<RateRow>() {
            let row = row.map_err(|e| parse_error(e.to_string()))?;

            if row.country.is_empty() {
                debug!(area = %row.area, "Skipping rate row without a country");
                continue;
            }

            let (Some(full_dsa), Some(lunch_only), Some(dinner_only)) =
                (row.full_dsa, row.lunch_only, row.dinner_only)
            else {
                return Err(parse_error(format!(
                    "missing rate for country '{}', area '{}'",
                    row.country, row.area
                )));
            };

            entries.push(RateEntry {
                country: row.country,
                area: row.area,
                full_dsa,
                lunch_only,
                dinner_only,
            });
        }

        if entries.is_empty() {
            return Err(parse_error("no rate rows found".to_string()));
        }

        RateTable::new(entries).map_err(|e| parse_error(e.to_string()))
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &DsaConfig {
        &self.config
    }

    /// Returns the rate table metadata.
    pub fn metadata(&self) -> &RateTableMetadata {
        self.config.metadata()
    }

    /// Returns the DSA policy.
    pub fn policy(&self) -> &DsaPolicy {
        self.config.policy()
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        self.config.rates()
    }

    /// Gets the rate entry for a (country, area) pair.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dsa_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/dsa_2025")?;
    /// let rate = loader.lookup_rate("Egypt", "Cairo")?;
    /// println!("Dinner only: {}", rate.dinner_only);
    /// # Ok::<(), dsa_engine::error::EngineError>(())
    /// ```
    pub fn lookup_rate(&self, country: &str, area: &str) -> EngineResult<&RateEntry> {
        self.config.rates().get(country, area)
    }
}
