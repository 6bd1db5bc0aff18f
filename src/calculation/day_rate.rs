//! Shared day-rate types for the departure and return day rules.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DayRateTier, RateEntry};

/// The amount paid for a departure or return day.
#[derive(Debug, Clone)]
pub struct DayAmountResult {
    /// The tier that applies.
    pub tier: DayRateTier,
    /// The amount for the tier, taken from the rate entry.
    pub amount: Decimal,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Returns the rate entry's amount for a tier.
pub fn tier_amount(rate: &RateEntry, tier: DayRateTier) -> Decimal {
    match tier {
        DayRateTier::Full => rate.full_dsa,
        DayRateTier::LunchOnly => rate.lunch_only,
        DayRateTier::DinnerOnly => rate.dinner_only,
        DayRateTier::NoAllowance => Decimal::ZERO,
    }
}
