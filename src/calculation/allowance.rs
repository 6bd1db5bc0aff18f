//! Allowance calculation for a single destination stay.
//!
//! This module combines the individual rules into the allowance for one
//! trip window:
//!
//! 1. Count the travel days
//! 2. Price the departure day by departure time
//! 3. Price the return day by return time
//! 4. Pay the full rate for every day in between
//! 5. Deduct provided meals
//! 6. Apply the negative net policy
//!
//! A trip that departs and returns on the same calendar day is paid both
//! the departure-day and the return-day amount.

use rust_decimal::Decimal;

use super::departure_day::calculate_departure_day;
use super::meal_deductions::calculate_deductions;
use super::return_day::calculate_return_day;
use super::travel_days::count_travel_days;
use crate::config::{DsaPolicy, NegativeNetPolicy};
use crate::error::EngineResult;
use crate::models::{
    AllowanceBreakdown, AuditStep, AuditWarning, DeductionCounts, RateEntry, TripWindow,
};

/// Warning code emitted when deductions exceed the gross allowance.
pub const NEGATIVE_NET_WARNING: &str = "NET_ALLOWANCE_NEGATIVE";

/// The result of an allowance calculation.
#[derive(Debug, Clone)]
pub struct AllowanceResult {
    /// Calendar days counted (at least 1).
    pub days_travelled: u32,
    /// Allowance before deductions.
    pub gross_allowance: Decimal,
    /// Allowance after deductions and the negative net policy.
    pub net_allowance: Decimal,
    /// How the allowance was built up.
    pub breakdown: AllowanceBreakdown,
    /// The audit steps recording this calculation, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the allowance for one trip window at one destination's rates.
///
/// Audit steps are numbered from `step_number` upwards; the next free step
/// number is `step_number + audit_steps.len()`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`](crate::error::EngineError::InvalidRange)
/// for an inverted window under the strict date range policy.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::compute_allowance;
/// use dsa_engine::config::DsaPolicy;
/// use dsa_engine::models::{DeductionCounts, RateEntry, TripWindow};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let rate = RateEntry {
///     country: "Jordan".to_string(),
///     area: "Amman".to_string(),
///     full_dsa: Decimal::new(300, 0),
///     lunch_only: Decimal::new(100, 0),
///     dinner_only: Decimal::new(200, 0),
/// };
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let window = TripWindow::new(parse("2025-03-01 09:00"), parse("2025-03-03 20:00"));
///
/// let result = compute_allowance(
///     &rate,
///     &window,
///     &DeductionCounts::new(1, 0, 0),
///     &DsaPolicy::default(),
///     1,
/// )?;
///
/// assert_eq!(result.days_travelled, 3);
/// assert_eq!(result.gross_allowance, Decimal::new(900, 0));
/// assert_eq!(result.net_allowance, Decimal::new(800, 0));
/// # Ok::<(), dsa_engine::error::EngineError>(())
/// ```
pub fn compute_allowance(
    rate: &RateEntry,
    window: &TripWindow,
    deductions: &DeductionCounts,
    policy: &DsaPolicy,
    step_number: u32,
) -> EngineResult<AllowanceResult> {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step = step_number;

    // Step 1: Travel days
    let days = count_travel_days(window, policy.date_range, step)?;
    audit_steps.push(days.audit_step);
    warnings.extend(days.warning);
    step += 1;

    // Step 2: Departure day
    let departure = calculate_departure_day(window.departure.time(), rate, &policy.departure, step);
    audit_steps.push(departure.audit_step);
    step += 1;

    // Step 3: Return day
    let return_day =
        calculate_return_day(window.return_datetime.time(), rate, &policy.return_day, step);
    audit_steps.push(return_day.audit_step);
    step += 1;

    // Step 4: Middle days and gross
    let middle_amount = rate.full_dsa * Decimal::from(days.middle_days);
    let gross_allowance = departure.amount + return_day.amount + middle_amount;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "gross_allowance".to_string(),
        rule_name: "Gross Allowance".to_string(),
        input: serde_json::json!({
            "departure_amount": departure.amount.to_string(),
            "return_amount": return_day.amount.to_string(),
            "middle_days": days.middle_days,
            "full_dsa": rate.full_dsa.to_string()
        }),
        output: serde_json::json!({
            "middle_amount": middle_amount.to_string(),
            "gross_allowance": gross_allowance.to_string()
        }),
        reasoning: format!(
            "{} + {} + {} x {} = {}",
            departure.amount, return_day.amount, days.middle_days, rate.full_dsa, gross_allowance
        ),
    });
    step += 1;

    // Step 5: Deductions
    let deduction = calculate_deductions(rate, deductions, step);
    audit_steps.push(deduction.audit_step);
    step += 1;

    // Step 6: Net
    let raw_net = gross_allowance - deduction.total;
    let net_allowance = if raw_net < Decimal::ZERO {
        let clamp = policy.negative_net == NegativeNetPolicy::ClampToZero;
        warnings.push(AuditWarning::new(
            NEGATIVE_NET_WARNING,
            format!(
                "Deductions of {} exceed the gross allowance of {}{}",
                deduction.total,
                gross_allowance,
                if clamp { "; net floored at 0" } else { "" }
            ),
            "high",
        ));
        if clamp { Decimal::ZERO } else { raw_net }
    } else {
        raw_net
    };
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "net_allowance".to_string(),
        rule_name: "Net Allowance".to_string(),
        input: serde_json::json!({
            "gross_allowance": gross_allowance.to_string(),
            "deduction_total": deduction.total.to_string(),
            "negative_net": policy.negative_net
        }),
        output: serde_json::json!({
            "net_allowance": net_allowance.to_string()
        }),
        reasoning: if net_allowance == raw_net {
            format!("{} - {} = {}", gross_allowance, deduction.total, net_allowance)
        } else {
            format!(
                "{} - {} = {}, floored at {}",
                gross_allowance, deduction.total, raw_net, net_allowance
            )
        },
    });

    Ok(AllowanceResult {
        days_travelled: days.days,
        gross_allowance,
        net_allowance,
        breakdown: AllowanceBreakdown {
            departure_tier: departure.tier,
            departure_amount: departure.amount,
            return_tier: return_day.tier,
            return_amount: return_day.amount,
            middle_days: days.middle_days,
            middle_amount,
            deduction_total: deduction.total,
        },
        audit_steps,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateRangePolicy;
    use crate::error::EngineError;
    use crate::models::DayRateTier;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn amman_rate() -> RateEntry {
        RateEntry {
            country: "Jordan".to_string(),
            area: "Amman".to_string(),
            full_dsa: dec("300"),
            lunch_only: dec("100"),
            dinner_only: dec("200"),
        }
    }

    fn window(dep: &str, ret: &str) -> TripWindow {
        let parse = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        TripWindow::new(parse(dep), parse(ret))
    }

    fn compute(
        window: &TripWindow,
        deductions: DeductionCounts,
        policy: &DsaPolicy,
    ) -> EngineResult<AllowanceResult> {
        compute_allowance(&amman_rate(), window, &deductions, policy, 1)
    }

    #[test]
    fn test_three_day_trip_with_one_lunch() {
        let result = compute(
            &window("2025-03-01 09:00", "2025-03-03 20:00"),
            DeductionCounts::new(1, 0, 0),
            &DsaPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.days_travelled, 3);
        assert_eq!(result.breakdown.departure_tier, DayRateTier::Full);
        assert_eq!(result.breakdown.return_tier, DayRateTier::Full);
        assert_eq!(result.breakdown.middle_days, 1);
        assert_eq!(result.gross_allowance, dec("900"));
        assert_eq!(result.breakdown.deduction_total, dec("100"));
        assert_eq!(result.net_allowance, dec("800"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_late_departure_early_return() {
        // 15:00 departure pays nothing, 12:00 return pays nothing, 2 middle days
        let result = compute(
            &window("2025-03-01 15:00", "2025-03-04 12:00"),
            DeductionCounts::default(),
            &DsaPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.days_travelled, 4);
        assert_eq!(result.breakdown.departure_amount, Decimal::ZERO);
        assert_eq!(result.breakdown.return_amount, Decimal::ZERO);
        assert_eq!(result.breakdown.middle_amount, dec("600"));
        assert_eq!(result.gross_allowance, dec("600"));
    }

    #[test]
    fn test_dinner_and_lunch_tiers() {
        let result = compute(
            &window("2025-03-01 11:00", "2025-03-02 14:00"),
            DeductionCounts::default(),
            &DsaPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.breakdown.departure_tier, DayRateTier::DinnerOnly);
        assert_eq!(result.breakdown.return_tier, DayRateTier::LunchOnly);
        assert_eq!(result.gross_allowance, dec("300"));
    }

    #[test]
    fn test_same_day_trip_pays_both_day_amounts() {
        let result = compute(
            &window("2025-03-01 08:00", "2025-03-01 20:00"),
            DeductionCounts::default(),
            &DsaPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.days_travelled, 1);
        assert_eq!(result.breakdown.middle_days, 0);
        assert_eq!(result.gross_allowance, dec("600"));
    }

    #[test]
    fn test_negative_net_is_kept_with_warning_by_default() {
        let result = compute(
            &window("2025-03-01 15:00", "2025-03-01 12:00"),
            DeductionCounts::new(0, 1, 0),
            &DsaPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.gross_allowance, Decimal::ZERO);
        assert_eq!(result.net_allowance, dec("-200"));
        assert!(result.warnings.iter().any(|w| w.code == NEGATIVE_NET_WARNING));
    }

    #[test]
    fn test_negative_net_clamps_to_zero_when_configured() {
        let policy = DsaPolicy {
            negative_net: NegativeNetPolicy::ClampToZero,
            ..DsaPolicy::default()
        };

        let result = compute(
            &window("2025-03-01 15:00", "2025-03-02 12:00"),
            DeductionCounts::new(0, 0, 2),
            &policy,
        )
        .unwrap();

        assert_eq!(result.net_allowance, Decimal::ZERO);
        let warning = result
            .warnings
            .iter()
            .find(|w| w.code == NEGATIVE_NET_WARNING)
            .unwrap();
        assert!(warning.message.contains("floored at 0"));
    }

    #[test]
    fn test_strict_policy_rejects_inverted_window() {
        let policy = DsaPolicy {
            date_range: DateRangePolicy::Strict,
            ..DsaPolicy::default()
        };

        let result = compute(
            &window("2025-03-05 09:00", "2025-03-01 20:00"),
            DeductionCounts::default(),
            &policy,
        );
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn test_lenient_policy_counts_inverted_window_as_one_day() {
        let result = compute(
            &window("2025-03-05 09:00", "2025-03-01 20:00"),
            DeductionCounts::default(),
            &DsaPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.days_travelled, 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_audit_steps_are_numbered_consecutively() {
        let result = compute_allowance(
            &amman_rate(),
            &window("2025-03-01 09:00", "2025-03-03 20:00"),
            &DeductionCounts::default(),
            &DsaPolicy::default(),
            4,
        )
        .unwrap();

        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![4, 5, 6, 7, 8, 9]);
        assert_eq!(result.audit_steps[5].rule_id, "net_allowance");
    }
}
