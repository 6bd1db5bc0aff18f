//! Core data models for the DSA engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod deductions;
mod expense;
mod meeting;
mod mission_record;
mod rate_table;
mod travel_authorization;
mod trip;

pub use calculation_result::{
    AllowanceBreakdown, AuditStep, AuditTrace, AuditWarning, DayRateTier, DsaResult,
    MissionCalculation, MissionTotals,
};
pub use deductions::{AdjustmentDirection, DeductionAdjustment, DeductionCounts, DeductionKind};
pub use expense::{Currency, ExpenseCategory, ExpenseEntry, ExpenseLine};
pub use meeting::{
    GroundTransport, MeetingCostLine, MeetingCostRequest, MeetingCostSummary,
    OtherMeetingExpense, PerPaxCost, PerPaxItem,
};
pub use mission_record::{MissionAmendment, MissionRecord};
pub use rate_table::{RateEntry, RateTable};
pub use travel_authorization::TravelAuthorization;
pub use trip::{MissionRequest, TripLeg, TripPlan, TripType, TripWindow};
