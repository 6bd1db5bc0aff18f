//! Calculation result models for the DSA engine.
//!
//! This module contains the [`DsaResult`] produced for every trip leg, the
//! [`MissionCalculation`] that aggregates legs into a mission, and the audit
//! structures that record every rule decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TripType;

/// The rate tier applied to a departure or return day.
///
/// # Example
///
/// ```
/// use dsa_engine::models::DayRateTier;
///
/// let tier = DayRateTier::DinnerOnly;
/// assert_eq!(serde_json::to_string(&tier).unwrap(), "\"dinner_only\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayRateTier {
    /// The full daily rate.
    Full,
    /// The lunch-only rate.
    LunchOnly,
    /// The dinner-only rate.
    DinnerOnly,
    /// Nothing is paid for the day.
    NoAllowance,
}

/// How a leg's allowance was built up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// Tier applied to the departure day.
    pub departure_tier: DayRateTier,
    /// Amount paid for the departure day.
    pub departure_amount: Decimal,
    /// Tier applied to the return day.
    pub return_tier: DayRateTier,
    /// Amount paid for the return day.
    pub return_amount: Decimal,
    /// Number of full days between departure and return day.
    pub middle_days: u32,
    /// Amount paid for the middle days.
    pub middle_amount: Decimal,
    /// Total deducted for provided meals.
    pub deduction_total: Decimal,
}

/// The allowance computed for a single trip leg.
///
/// # Example
///
/// ```
/// use dsa_engine::models::{AllowanceBreakdown, DayRateTier, DsaResult};
/// use rust_decimal::Decimal;
///
/// let result = DsaResult {
///     country: "Jordan".to_string(),
///     area: "Amman".to_string(),
///     days_travelled: 3,
///     gross_allowance: Decimal::new(900, 0),
///     net_allowance: Decimal::new(800, 0),
///     attachments_count: 2,
///     breakdown: AllowanceBreakdown {
///         departure_tier: DayRateTier::Full,
///         departure_amount: Decimal::new(300, 0),
///         return_tier: DayRateTier::Full,
///         return_amount: Decimal::new(300, 0),
///         middle_days: 1,
///         middle_amount: Decimal::new(300, 0),
///         deduction_total: Decimal::new(100, 0),
///     },
/// };
/// assert_eq!(result.gross_allowance - result.breakdown.deduction_total, result.net_allowance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaResult {
    /// The destination country.
    pub country: String,
    /// The destination area.
    pub area: String,
    /// Calendar days counted for the leg (at least 1).
    pub days_travelled: u32,
    /// Allowance before deductions.
    pub gross_allowance: Decimal,
    /// Allowance after deductions.
    pub net_allowance: Decimal,
    /// The number of receipts attached to the leg.
    pub attachments_count: u32,
    /// The detailed build-up of the allowance.
    pub breakdown: AllowanceBreakdown,
}

/// Aggregated totals across all legs of a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionTotals {
    /// Sum of days counted for each leg.
    pub days_travelled: u32,
    /// Sum of gross allowances.
    pub gross_allowance: Decimal,
    /// Sum of deductions.
    pub deduction_total: Decimal,
    /// Sum of net allowances.
    pub net_allowance: Decimal,
    /// Sum of attached receipts.
    pub attachments_count: u32,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are computed but may need review, such as
/// an inverted trip window or deductions exceeding the gross allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use dsa_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 42,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a mission allowance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The traveler's name.
    pub traveler: String,
    /// The travel authorization number.
    pub ta_number: String,
    /// The kind of trip.
    pub trip_type: TripType,
    /// The currency of all amounts.
    pub currency: String,
    /// One result per leg, in travel order.
    pub legs: Vec<DsaResult>,
    /// Totals across legs.
    pub totals: MissionTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
