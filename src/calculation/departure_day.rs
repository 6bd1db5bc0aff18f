//! Departure day rate calculation.
//!
//! The departure day is paid according to the time of day the traveler
//! leaves:
//!
//! | Departure time                          | Rate        |
//! |-----------------------------------------|-------------|
//! | before `full_rate_before` (10:00)       | full DSA    |
//! | up to and including `dinner_rate_until` (14:00) | dinner only |
//! | after `dinner_rate_until`               | nothing     |

use chrono::NaiveTime;

use super::day_rate::{DayAmountResult, tier_amount};
use crate::config::DepartureBoundaries;
use crate::models::{AuditStep, DayRateTier, RateEntry};

/// Determines the rate tier for a departure time.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::departure_day_tier;
/// use dsa_engine::config::DepartureBoundaries;
/// use dsa_engine::models::DayRateTier;
/// use chrono::NaiveTime;
///
/// let bounds = DepartureBoundaries::default();
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert_eq!(departure_day_tier(at(9, 59), &bounds), DayRateTier::Full);
/// assert_eq!(departure_day_tier(at(10, 0), &bounds), DayRateTier::DinnerOnly);
/// assert_eq!(departure_day_tier(at(14, 0), &bounds), DayRateTier::DinnerOnly);
/// assert_eq!(departure_day_tier(at(14, 1), &bounds), DayRateTier::NoAllowance);
/// ```
pub fn departure_day_tier(time: NaiveTime, boundaries: &DepartureBoundaries) -> DayRateTier {
    if time < boundaries.full_rate_before {
        DayRateTier::Full
    } else if time <= boundaries.dinner_rate_until {
        DayRateTier::DinnerOnly
    } else {
        DayRateTier::NoAllowance
    }
}

/// Calculates the amount paid for the departure day.
pub fn calculate_departure_day(
    departure_time: NaiveTime,
    rate: &RateEntry,
    boundaries: &DepartureBoundaries,
    step_number: u32,
) -> DayAmountResult {
    let tier = departure_day_tier(departure_time, boundaries);
    let amount = tier_amount(rate, tier);

    let reasoning = match tier {
        DayRateTier::Full => format!(
            "Departed at {} (before {}): full rate {}",
            departure_time, boundaries.full_rate_before, amount
        ),
        DayRateTier::DinnerOnly => format!(
            "Departed at {} (between {} and {}): dinner-only rate {}",
            departure_time, boundaries.full_rate_before, boundaries.dinner_rate_until, amount
        ),
        _ => format!(
            "Departed at {} (after {}): no allowance for the departure day",
            departure_time, boundaries.dinner_rate_until
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "departure_day".to_string(),
        rule_name: "Departure Day Rate".to_string(),
        input: serde_json::json!({
            "departure_time": departure_time.to_string(),
            "full_rate_before": boundaries.full_rate_before.to_string(),
            "dinner_rate_until": boundaries.dinner_rate_until.to_string()
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
