//! Meeting authorisation costing.
//!
//! Per-participant items are multiplied by the head count, ground transport
//! by the number of transfers, and other expenses are taken as entered.
//! Every line is converted to CHF with its own exchange rate.

use rust_decimal::Decimal;

use super::expense_line::{checked_product, convert_to_chf};
use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, MeetingCostLine, MeetingCostRequest, MeetingCostSummary};

/// Counts the participants a meeting is budgeted for.
///
/// Non-blank participant names are counted. When none are listed the
/// manual head count applies, defaulting to 1.
pub fn meeting_pax(request: &MeetingCostRequest) -> EngineResult<u32> {
    let listed = request
        .participants
        .iter()
        .filter(|name| !name.trim().is_empty())
        .count();

    if listed > 0 {
        return u32::try_from(listed).map_err(|_| EngineError::InvalidInput {
            field: "participants".to_string(),
            message: format!("too many participants ({})", listed),
        });
    }

    match request.manual_pax {
        Some(0) => Err(EngineError::InvalidInput {
            field: "manual_pax".to_string(),
            message: "head count must be at least 1".to_string(),
        }),
        Some(pax) => Ok(pax),
        None => Ok(1),
    }
}

fn cost_line(
    label: impl Into<String>,
    currency: Currency,
    amount: Decimal,
    exchange_rate: Decimal,
) -> EngineResult<MeetingCostLine> {
    Ok(MeetingCostLine {
        label: label.into(),
        currency,
        amount,
        amount_chf: convert_to_chf(amount, exchange_rate)?,
    })
}

/// Totals a meeting authorisation in CHF.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::calculate_meeting_cost;
/// use dsa_engine::models::{Currency, MeetingCostRequest, PerPaxCost, PerPaxItem};
/// use rust_decimal::Decimal;
///
/// let request = MeetingCostRequest {
///     event_name: "Regional workshop".to_string(),
///     mf_number: "MF-NARD-25-008".to_string(),
///     participants: vec!["Rania Haddad".to_string(), "Omar Said".to_string()],
///     manual_pax: None,
///     per_pax_costs: vec![PerPaxCost {
///         item: PerPaxItem::Hotel,
///         currency: Currency::Chf,
///         amount_per_pax: Decimal::new(150, 0),
///         exchange_rate: Decimal::ONE,
///         details: String::new(),
///     }],
///     ground_transport: None,
///     other_expenses: vec![],
/// };
///
/// let summary = calculate_meeting_cost(&request)?;
/// assert_eq!(summary.pax, 2);
/// assert_eq!(summary.total_chf, Decimal::new(300, 0));
/// # Ok::<(), dsa_engine::error::EngineError>(())
/// ```
pub fn calculate_meeting_cost(request: &MeetingCostRequest) -> EngineResult<MeetingCostSummary> {
    let pax = meeting_pax(request)?;
    let mut lines = Vec::new();

    for cost in &request.per_pax_costs {
        lines.push(cost_line(
            cost.item.label(),
            cost.currency,
            checked_product(cost.amount_per_pax, Decimal::from(pax), "amount_per_pax")?,
            cost.exchange_rate,
        )?);
    }

    if let Some(transport) = &request.ground_transport {
        lines.push(cost_line(
            "Ground Transportation",
            transport.currency,
            checked_product(
                transport.amount_per_transfer,
                Decimal::from(transport.transfers),
                "amount_per_transfer",
            )?,
            transport.exchange_rate,
        )?);
    }

    for expense in &request.other_expenses {
        let label = if expense.name.trim().is_empty() {
            "Other expense".to_string()
        } else {
            expense.name.clone()
        };
        lines.push(cost_line(
            label,
            expense.currency,
            expense.amount,
            expense.exchange_rate,
        )?);
    }

    let total_chf = lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.amount_chf))
        .ok_or_else(|| EngineError::InvalidInput {
            field: "amount".to_string(),
            message: "meeting total is too large".to_string(),
        })?;

    Ok(MeetingCostSummary {
        event_name: request.event_name.clone(),
        mf_number: request.mf_number.clone(),
        pax,
        lines,
        total_chf,
    })
}
