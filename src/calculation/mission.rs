//! Mission calculation entry point.
//!
//! Every trip plan, whatever its type, goes through [`calculate_mission`]:
//! the plan is validated, each leg is priced in order with one continuous
//! audit step numbering, and the leg results are summed into totals.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::allowance::compute_allowance;
use super::rate_lookup::lookup_rate;
use crate::config::DsaConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DsaResult, MissionCalculation, MissionRequest,
    MissionTotals, TripLeg, TripPlan,
};

/// Warning code emitted when a leg starts before the previous one ends.
pub const OVERLAPPING_LEGS_WARNING: &str = "OVERLAPPING_LEGS";

/// Checks that a trip plan can be calculated.
///
/// A multi-destination plan needs at least one leg, and every leg needs a
/// non-blank country and area.
pub fn validate_trip_plan(plan: &TripPlan) -> EngineResult<()> {
    if matches!(plan, TripPlan::MultiDestination { legs } if legs.is_empty()) {
        return Err(EngineError::InvalidTrip {
            message: "a multi-destination trip needs at least one leg".to_string(),
        });
    }

    for (index, leg) in plan.legs().iter().enumerate() {
        if leg.country.trim().is_empty() {
            return Err(EngineError::InvalidTrip {
                message: format!("leg {} has no country", index + 1),
            });
        }
        if leg.area.trim().is_empty() {
            return Err(EngineError::InvalidTrip {
                message: format!("leg {} has no area", index + 1),
            });
        }
    }

    Ok(())
}

fn overlap_warnings(legs: &[TripLeg]) -> Vec<AuditWarning> {
    legs.windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1].window.departure < pair[0].window.return_datetime)
        .map(|(index, pair)| {
            AuditWarning::new(
                OVERLAPPING_LEGS_WARNING,
                format!(
                    "Leg {} departs at {} before leg {} returns at {}",
                    index + 2,
                    pair[1].window.departure,
                    index + 1,
                    pair[0].window.return_datetime
                ),
                "medium",
            )
        })
        .collect()
}

/// Calculates the allowance for every leg of a mission.
///
/// Legs are priced in travel order with the configuration's rate table and
/// policy. The first failing leg aborts the whole calculation, so either
/// every leg has a result or none does.
///
/// # Errors
///
/// * [`EngineError::InvalidTrip`] for a malformed plan
/// * [`EngineError::RateNotFound`] when a leg's destination is not in the table
/// * [`EngineError::InvalidRange`] for an inverted window under the strict policy
/// * [`EngineError::InvalidInput`] when a mission total does not fit its type
pub fn calculate_mission(
    config: &DsaConfig,
    request: &MissionRequest,
) -> EngineResult<MissionCalculation> {
    let start_time = Instant::now();
    validate_trip_plan(&request.trip)?;

    let legs = request.trip.legs();
    let mut results: Vec<DsaResult> = Vec::with_capacity(legs.len());
    let mut all_audit_steps: Vec<AuditStep> = Vec::new();
    let mut all_warnings: Vec<AuditWarning> = overlap_warnings(legs);
    let mut step_number: u32 = 1;

    for leg in legs {
        let rate_result = lookup_rate(config.rates(), &leg.country, &leg.area, step_number)?;
        all_audit_steps.push(rate_result.audit_step);
        step_number += 1;

        let allowance = compute_allowance(
            &rate_result.rate,
            &leg.window,
            &leg.deductions,
            config.policy(),
            step_number,
        )?;
        step_number += allowance.audit_steps.len() as u32;
        all_audit_steps.extend(allowance.audit_steps);
        all_warnings.extend(allowance.warnings);

        results.push(DsaResult {
            country: leg.country.clone(),
            area: leg.area.clone(),
            days_travelled: allowance.days_travelled,
            gross_allowance: allowance.gross_allowance,
            net_allowance: allowance.net_allowance,
            attachments_count: leg.attachments_count,
            breakdown: allowance.breakdown,
        });
    }

    let totals = MissionTotals {
        days_travelled: count_total(&results, "days_travelled", |r| r.days_travelled)?,
        gross_allowance: amount_total(&results, "gross_allowance", |r| r.gross_allowance)?,
        deduction_total: amount_total(&results, "deduction_total", |r| {
            r.breakdown.deduction_total
        })?,
        net_allowance: amount_total(&results, "net_allowance", |r| r.net_allowance)?,
        attachments_count: count_total(&results, "attachments_count", |r| r.attachments_count)?,
    };

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(MissionCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        traveler: request.traveler.clone(),
        ta_number: request.ta_number.clone(),
        trip_type: request.trip.trip_type(),
        currency: config.metadata().currency.clone(),
        legs: results,
        totals,
        audit_trace: AuditTrace {
            steps: all_audit_steps,
            warnings: all_warnings,
            duration_us,
        },
    })
}

fn total_overflow(field: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("mission total of {} is too large", field),
    }
}

fn count_total(
    results: &[DsaResult],
    field: &str,
    value: impl Fn(&DsaResult) -> u32,
) -> EngineResult<u32> {
    results
        .iter()
        .try_fold(0u32, |total, r| total.checked_add(value(r)))
        .ok_or_else(|| total_overflow(field))
}

fn amount_total(
    results: &[DsaResult],
    field: &str,
    value: impl Fn(&DsaResult) -> Decimal,
) -> EngineResult<Decimal> {
    results
        .iter()
        .try_fold(Decimal::ZERO, |total, r| total.checked_add(value(r)))
        .ok_or_else(|| total_overflow(field))
}
