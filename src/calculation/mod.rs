//! Calculation logic for the DSA engine.
//!
//! This module contains one function per rule: rate lookup, travel day
//! counting, departure and return day pricing, meal deductions, the
//! combined allowance for a stay and the mission entry point that prices
//! every leg of a trip. It also holds the smaller rules used around the
//! allowance: travel authorization numbering, expense coding and meeting
//! costing.

mod allowance;
mod day_rate;
mod departure_day;
mod expense_line;
mod meal_deductions;
mod meeting_cost;
mod mission;
mod rate_lookup;
mod return_day;
mod ta_number;
mod travel_days;

pub use allowance::{AllowanceResult, NEGATIVE_NET_WARNING, compute_allowance};
pub use day_rate::{DayAmountResult, tier_amount};
pub use departure_day::{calculate_departure_day, departure_day_tier};
pub use expense_line::{convert_to_chf, prepare_expense_line};
pub use meal_deductions::{DeductionResult, calculate_deductions};
pub use meeting_cost::{calculate_meeting_cost, meeting_pax};
pub use mission::{OVERLAPPING_LEGS_WARNING, calculate_mission, validate_trip_plan};
pub use rate_lookup::{RateLookupResult, lookup_rate};
pub use return_day::{calculate_return_day, return_day_tier};
pub use ta_number::generate_ta_number;
pub use travel_days::{INVERTED_WINDOW_WARNING, TravelDaysResult, compute_days, count_travel_days};
