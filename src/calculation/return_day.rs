//! Return day rate calculation.
//!
//! The return day is paid according to the time the traveler gets back.
//! Returns after `full_rate_after` (19:00) earn the full rate, returns from
//! `lunch_rate_from` (13:00) earn the lunch-only rate, earlier returns earn
//! nothing.

use chrono::NaiveTime;

use super::day_rate::{DayAmountResult, tier_amount};
use crate::config::ReturnBoundaries;
use crate::models::{AuditStep, DayRateTier, RateEntry};

/// Determines the rate tier for a return time.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::return_day_tier;
/// use dsa_engine::config::ReturnBoundaries;
/// use dsa_engine::models::DayRateTier;
/// use chrono::NaiveTime;
///
/// let bounds = ReturnBoundaries::default();
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert_eq!(return_day_tier(at(19, 1), &bounds), DayRateTier::Full);
/// assert_eq!(return_day_tier(at(19, 0), &bounds), DayRateTier::LunchOnly);
/// assert_eq!(return_day_tier(at(13, 0), &bounds), DayRateTier::LunchOnly);
/// assert_eq!(return_day_tier(at(12, 59), &bounds), DayRateTier::NoAllowance);
/// ```
pub fn return_day_tier(time: NaiveTime, boundaries: &ReturnBoundaries) -> DayRateTier {
    if time > boundaries.full_rate_after {
        DayRateTier::Full
    } else if time >= boundaries.lunch_rate_from {
        DayRateTier::LunchOnly
    } else {
        DayRateTier::NoAllowance
    }
}

/// Calculates the amount paid for the return day.
pub fn calculate_return_day(
    return_time: NaiveTime,
    rate: &RateEntry,
    boundaries: &ReturnBoundaries,
    step_number: u32,
) -> DayAmountResult {
    let tier = return_day_tier(return_time, boundaries);
    let amount = tier_amount(rate, tier);

    let reasoning = match tier {
        DayRateTier::Full => format!(
            "Returned at {} (after {}): full rate {}",
            return_time, boundaries.full_rate_after, amount
        ),
        DayRateTier::LunchOnly => format!(
            "Returned at {} (between {} and {}): lunch-only rate {}",
            return_time, boundaries.lunch_rate_from, boundaries.full_rate_after, amount
        ),
        _ => format!(
            "Returned at {} (before {}): no allowance for the return day",
            return_time, boundaries.lunch_rate_from
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "return_day".to_string(),
        rule_name: "Return Day Rate".to_string(),
        input: serde_json::json!({
            "return_time": return_time.to_string(),
            "lunch_rate_from": boundaries.lunch_rate_from.to_string(),
            "full_rate_after": boundaries.full_rate_after.to_string()
        }),
        output: serde_json::json!({
            "tier": tier,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    DayAmountResult {
        tier,
        amount,
        audit_step,
    }
}
