//! Rate table models.
//!
//! This module defines the [`RateEntry`] type, one row of the published DSA
//! rate table, and the [`RateTable`] that indexes entries by
//! (country, area).

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The DSA rates for a single (country, area) pair.
///
/// # Example
///
/// ```
/// use dsa_engine::models::RateEntry;
/// use rust_decimal::Decimal;
///
/// let entry = RateEntry {
///     country: "Jordan".to_string(),
///     area: "Amman".to_string(),
///     full_dsa: Decimal::new(300, 0),
///     lunch_only: Decimal::new(100, 0),
///     dinner_only: Decimal::new(200, 0),
/// };
/// assert_eq!(entry.full_dsa, Decimal::new(300, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// The country name as published in the rate table.
    pub country: String,
    /// The area (city or region) within the country.
    pub area: String,
    /// The full daily rate.
    pub full_dsa: Decimal,
    /// The rate when only lunch is covered.
    pub lunch_only: Decimal,
    /// The rate when only dinner is covered.
    pub dinner_only: Decimal,
}

/// An immutable rate table keyed uniquely by (country, area).
///
/// Entries keep the order in which they were loaded. Lookups are exact
/// string matches on both country and area.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    entries: Vec<RateEntry>,
    index: HashMap<(String, String), usize>,
}

impl RateTable {
    /// Builds a rate table from its entries.
    ///
    /// Fails with [`EngineError::InvalidInput`] if two entries share the same
    /// (country, area) pair or if any rate is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use dsa_engine::models::{RateEntry, RateTable};
    /// use rust_decimal::Decimal;
    ///
    /// let table = RateTable::new(vec![RateEntry {
    ///     country: "Tunisia".to_string(),
    ///     area: "Tunis".to_string(),
    ///     full_dsa: Decimal::new(180, 0),
    ///     lunch_only: Decimal::new(60, 0),
    ///     dinner_only: Decimal::new(120, 0),
    /// }])?;
    /// assert_eq!(table.len(), 1);
    /// # Ok::<(), dsa_engine::error::EngineError>(())
    /// ```
    pub fn new(entries: Vec<RateEntry>) -> EngineResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.full_dsa.is_sign_negative()
                || entry.lunch_only.is_sign_negative()
                || entry.dinner_only.is_sign_negative()
            {
                return Err(EngineError::InvalidInput {
                    field: "rates".to_string(),
                    message: format!(
                        "negative rate for country '{}', area '{}'",
                        entry.country, entry.area
                    ),
                });
            }

            let key = (entry.country.clone(), entry.area.clone());
            if index.insert(key, position).is_some() {
                return Err(EngineError::InvalidInput {
                    field: "rates".to_string(),
                    message: format!(
                        "duplicate entry for country '{}', area '{}'",
                        entry.country, entry.area
                    ),
                });
            }
        }

        Ok(Self { entries, index })
    }

    /// Returns the entry for an exact (country, area) pair.
    ///
    /// Returns [`EngineError::RateNotFound`] when the pair is absent,
    /// including when the area exists but belongs to another country.
    pub fn get(&self, country: &str, area: &str) -> EngineResult<&RateEntry> {
        self.index
            .get(&(country.to_string(), area.to_string()))
            .map(|&position| &self.entries[position])
            .ok_or_else(|| EngineError::RateNotFound {
                country: country.to_string(),
                area: area.to_string(),
            })
    }

    /// Returns the distinct countries in the table, sorted.
    pub fn countries(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the areas associated with a country, sorted.
    ///
    /// An unknown country yields an empty list.
    pub fn areas(&self, country: &str) -> Vec<&str> {
        let mut areas: Vec<&str> = self
            .entries
            .iter()
            .filter(|e| e.country == country)
            .map(|e| e.area.as_str())
            .collect();
        areas.sort_unstable();
        areas
    }

    /// Returns all entries in load order.
    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
