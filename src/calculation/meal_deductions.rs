//! Meal deduction calculation.
//!
//! Meals provided during a stay are deducted from the allowance at the
//! destination's own rates: each provided lunch at the lunch-only rate,
//! each provided dinner at the dinner-only rate and each fully provided
//! day at the full rate.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DeductionCounts, RateEntry};

/// The result of a deduction calculation.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// Total amount to deduct.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the total deduction for the provided meals.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::calculate_deductions;
/// use dsa_engine::models::{DeductionCounts, RateEntry};
/// use rust_decimal::Decimal;
///
/// let rate = RateEntry {
///     country: "Jordan".to_string(),
///     area: "Amman".to_string(),
///     full_dsa: Decimal::new(300, 0),
///     lunch_only: Decimal::new(100, 0),
///     dinner_only: Decimal::new(200, 0),
/// };
///
/// let result = calculate_deductions(&rate, &DeductionCounts::new(1, 1, 0), 5);
/// assert_eq!(result.total, Decimal::new(300, 0));
/// ```
pub fn calculate_deductions(
    rate: &RateEntry,
    counts: &DeductionCounts,
    step_number: u32,
) -> DeductionResult {
    let lunch_total = rate.lunch_only * Decimal::from(counts.lunch);
    let dinner_total = rate.dinner_only * Decimal::from(counts.dinner);
    let full_total = rate.full_dsa * Decimal::from(counts.full);
    let total = lunch_total + dinner_total + full_total;

    let audit_step = AuditStep {
        step_number,
        rule_id: "meal_deductions".to_string(),
        rule_name: "Provided Meal Deductions".to_string(),
        input: serde_json::json!({
            "lunch": counts.lunch,
            "dinner": counts.dinner,
            "full": counts.full,
            "lunch_only": rate.lunch_only.to_string(),
            "dinner_only": rate.dinner_only.to_string(),
            "full_dsa": rate.full_dsa.to_string()
        }),
        output: serde_json::json!({
            "lunch_total": lunch_total.to_string(),
            "dinner_total": dinner_total.to_string(),
            "full_total": full_total.to_string(),
            "total": total.to_string()
        }),
        reasoning: if counts.is_empty() {
            "No meals provided".to_string()
        } else {
            format!(
                "{} x {} + {} x {} + {} x {} = {}",
                counts.lunch,
                rate.lunch_only,
                counts.dinner,
                rate.dinner_only,
                counts.full,
                rate.full_dsa,
                total
            )
        },
    };

    DeductionResult { total, audit_step }
}
