//! Meeting cost models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;
use super::expense::default_exchange_rate;

/// Cost items budgeted per participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerPaxItem {
    /// International flights.
    FlightInternational,
    /// Participant reimbursements.
    Reimbursement,
    /// Audio equipment.
    AudioEquipment,
    /// Hotel, subject to a purchase order.
    Hotel,
    /// Catering, subject to a purchase order.
    Catering,
}

impl PerPaxItem {
    /// Returns the label used on cost lines.
    pub fn label(&self) -> &'static str {
        match self {
            PerPaxItem::FlightInternational => "Flight Intl",
            PerPaxItem::Reimbursement => "Reimbursement",
            PerPaxItem::AudioEquipment => "Audio Equipment",
            PerPaxItem::Hotel => "Hotel",
            PerPaxItem::Catering => "Catering",
        }
    }
}

/// A per-participant cost line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPaxCost {
    /// What the cost covers.
    pub item: PerPaxItem,
    /// The currency of `amount_per_pax`.
    pub currency: Currency,
    /// The amount per participant.
    pub amount_per_pax: Decimal,
    /// Units of CHF per unit of `currency`.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Decimal,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// Ground transportation, budgeted per transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTransport {
    /// Number of transfers.
    pub transfers: u32,
    /// The currency of `amount_per_transfer`.
    pub currency: Currency,
    /// The amount per transfer.
    pub amount_per_transfer: Decimal,
    /// Units of CHF per unit of `currency`.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Decimal,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// A free-form meeting expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherMeetingExpense {
    /// The expense name.
    pub name: String,
    /// The currency of `amount`.
    pub currency: Currency,
    /// The total amount.
    pub amount: Decimal,
    /// Units of CHF per unit of `currency`.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Decimal,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// Everything needed to total a meeting authorisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCostRequest {
    /// Event name.
    pub event_name: String,
    /// Meeting form number (e.g. `MF-NARD-25-008`).
    #[serde(default)]
    pub mf_number: String,
    /// Participant names. Blank entries are ignored.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Head count used when no participants are listed.
    #[serde(default)]
    pub manual_pax: Option<u32>,
    /// Per-participant costs.
    #[serde(default)]
    pub per_pax_costs: Vec<PerPaxCost>,
    /// Ground transportation.
    #[serde(default)]
    pub ground_transport: Option<GroundTransport>,
    /// Other expenses.
    #[serde(default)]
    pub other_expenses: Vec<OtherMeetingExpense>,
}

/// One line of the meeting cost summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCostLine {
    /// What the line covers.
    pub label: String,
    /// The original currency.
    pub currency: Currency,
    /// The line total in its original currency.
    pub amount: Decimal,
    /// The line total in CHF.
    pub amount_chf: Decimal,
}

/// The computed meeting authorisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCostSummary {
    /// Event name.
    pub event_name: String,
    /// Meeting form number.
    pub mf_number: String,
    /// Participant count used for per-pax lines.
    pub pax: u32,
    /// The cost lines.
    pub lines: Vec<MeetingCostLine>,
    /// Total meeting authorisation in CHF.
    pub total_chf: Decimal,
}
