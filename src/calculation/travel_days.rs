//! Travel day counting.
//!
//! Both the departure and the return calendar days count as travel days,
//! so a trip that starts and ends on the same date counts as one day.

use chrono::NaiveDate;

use crate::config::DateRangePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, TripWindow};

/// Warning code emitted when a lenient policy accepts an inverted window.
pub const INVERTED_WINDOW_WARNING: &str = "INVERTED_TRIP_WINDOW";

/// Counts the calendar days of a trip, inclusive of both ends.
///
/// Returns `(return_date - departure_date).days + 1`, floored at 1.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::compute_days;
/// use chrono::NaiveDate;
///
/// let dep = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let ret = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// assert_eq!(compute_days(dep, ret), 3);
/// assert_eq!(compute_days(dep, dep), 1);
/// assert_eq!(compute_days(ret, dep), 1);
/// ```
pub fn compute_days(departure_date: NaiveDate, return_date: NaiveDate) -> u32 {
    let days = (return_date - departure_date).num_days() + 1;
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

/// The result of counting travel days for a trip window.
#[derive(Debug, Clone)]
pub struct TravelDaysResult {
    /// Calendar days counted, at least 1.
    pub days: u32,
    /// Days strictly between the departure and return day.
    pub middle_days: u32,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
    /// Set when an inverted window was accepted under the lenient policy.
    pub warning: Option<AuditWarning>,
}

/// Counts travel days for a window, applying the date range policy.
///
/// Under [`DateRangePolicy::Strict`] an inverted window fails with
/// [`EngineError::InvalidRange`]. Under [`DateRangePolicy::Lenient`] it is
/// counted as one day and a warning is attached.
pub fn count_travel_days(
    window: &TripWindow,
    policy: DateRangePolicy,
    step_number: u32,
) -> EngineResult<TravelDaysResult> {
    let inverted = window.is_inverted();

    if inverted && policy == DateRangePolicy::Strict {
        return Err(EngineError::InvalidRange {
            departure: window.departure,
            return_datetime: window.return_datetime,
        });
    }

    let days = compute_days(window.departure.date(), window.return_datetime.date());
    let middle_days = days.saturating_sub(2);

    let warning = inverted.then(|| {
        AuditWarning::new(
            INVERTED_WINDOW_WARNING,
            format!(
                "Return {} is earlier than departure {}; counted as a single day",
                window.return_datetime, window.departure
            ),
            "medium",
        )
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "travel_days".to_string(),
        rule_name: "Travel Day Count".to_string(),
        input: serde_json::json!({
            "departure_date": window.departure.date().to_string(),
            "return_date": window.return_datetime.date().to_string()
        }),
        output: serde_json::json!({
            "days": days,
            "middle_days": middle_days,
            "inverted": inverted
        }),
        reasoning: if inverted {
            "Return precedes departure; day count floored at 1".to_string()
        } else {
            format!(
                "{} to {} inclusive = {} day(s), {} middle day(s)",
                window.departure.date(),
                window.return_datetime.date(),
                days,
                middle_days
            )
        },
    };

    Ok(TravelDaysResult {
        days,
        middle_days,
        audit_step,
        warning,
    })
}
