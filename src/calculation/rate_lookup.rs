//! Rate lookup functionality.
//!
//! This module resolves the DSA rate entry for a destination and records
//! the lookup in the audit trail.

use crate::error::EngineResult;
use crate::models::{AuditStep, RateEntry, RateTable};

/// The result of a rate lookup, including the rate entry and audit step.
#[derive(Debug, Clone)]
pub struct RateLookupResult {
    /// The matching rate entry.
    pub rate: RateEntry,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the DSA rate for an exact (country, area) pair.
///
/// The area must be one of the areas listed for the country. A missing pair
/// is reported as [`EngineError::RateNotFound`](crate::error::EngineError::RateNotFound);
/// no default rate is ever substituted.
///
/// # Examples
///
/// ```
/// use dsa_engine::calculation::lookup_rate;
/// use dsa_engine::models::{RateEntry, RateTable};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::new(vec![RateEntry {
///     country: "Jordan".to_string(),
///     area: "Amman".to_string(),
///     full_dsa: Decimal::new(300, 0),
///     lunch_only: Decimal::new(100, 0),
///     dinner_only: Decimal::new(200, 0),
/// }])?;
///
/// let result = lookup_rate(&table, "Jordan", "Amman", 1)?;
/// assert_eq!(result.rate.full_dsa, Decimal::new(300, 0));
/// assert!(lookup_rate(&table, "Jordan", "Irbid", 1).is_err());
/// # Ok::<(), dsa_engine::error::EngineError>(())
/// ```
pub fn lookup_rate(
    table: &RateTable,
    country: &str,
    area: &str,
    step_number: u32,
) -> EngineResult<RateLookupResult> {
    let rate = table.get(country, area)?.clone();

    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_lookup".to_string(),
        rule_name: "DSA Rate Lookup".to_string(),
        input: serde_json::json!({
            "country": country,
            "area": area
        }),
        output: serde_json::json!({
            "full_dsa": rate.full_dsa.to_string(),
            "lunch_only": rate.lunch_only.to_string(),
            "dinner_only": rate.dinner_only.to_string()
        }),
        reasoning: format!(
            "Rates for {} / {}: full {}, lunch only {}, dinner only {}",
            country, area, rate.full_dsa, rate.lunch_only, rate.dinner_only
        ),
    };

    Ok(RateLookupResult { rate, audit_step })
}
