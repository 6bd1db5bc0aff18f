//! Trip models.
//!
//! This module defines the [`TripWindow`] travelled between departure and
//! return, the [`TripLeg`] that pairs a window with its destination, and the
//! [`TripPlan`] variant that selects between one-way, round-trip and
//! multi-destination input.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::DeductionCounts;

/// The time window of a trip.
///
/// The return date-time is expected to be on or after the departure
/// date-time. How an inverted window is handled depends on the configured
/// date range policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripWindow {
    /// When the traveler leaves the home base.
    pub departure: NaiveDateTime,
    /// When the traveler is back at the home base.
    #[serde(rename = "return")]
    pub return_datetime: NaiveDateTime,
}

impl TripWindow {
    /// Creates a new trip window.
    pub fn new(departure: NaiveDateTime, return_datetime: NaiveDateTime) -> Self {
        Self {
            departure,
            return_datetime,
        }
    }

    /// Returns true if the return precedes the departure.
    ///
    /// # Example
    ///
    /// ```
    /// use dsa_engine::models::TripWindow;
    /// use chrono::NaiveDateTime;
    ///
    /// let dep = NaiveDateTime::parse_from_str("2025-03-03 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let ret = NaiveDateTime::parse_from_str("2025-03-01 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert!(TripWindow::new(dep, ret).is_inverted());
    /// ```
    pub fn is_inverted(&self) -> bool {
        self.return_datetime < self.departure
    }
}

/// A single destination stay with its own rate, deductions and receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLeg {
    /// The destination country.
    pub country: String,
    /// The destination area within the country.
    pub area: String,
    /// Departure and return date-times for this leg.
    #[serde(flatten)]
    pub window: TripWindow,
    /// Meals provided during the stay, deducted from the allowance.
    #[serde(default)]
    pub deductions: DeductionCounts,
    /// The number of receipts attached to this leg.
    #[serde(default)]
    pub attachments_count: u32,
}

/// The kind of trip being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    /// A single outbound trip.
    OneWay,
    /// Out and back to a single destination.
    RoundTrip,
    /// Several destinations in sequence.
    MultiDestination,
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::OneWay => write!(f, "One-way"),
            TripType::RoundTrip => write!(f, "Round-trip"),
            TripType::MultiDestination => write!(f, "Multi-destination"),
        }
    }
}

/// The trip input, tagged by trip type.
///
/// Every variant resolves to one or more [`TripLeg`]s which the engine
/// processes through the same calculation path.
///
/// # Example
///
/// ```
/// use dsa_engine::models::{TripPlan, TripType};
///
/// let json = r#"{
///     "trip_type": "round_trip",
///     "leg": {
///         "country": "Jordan",
///         "area": "Amman",
///         "departure": "2025-03-01T09:00:00",
///         "return": "2025-03-03T20:00:00"
///     }
/// }"#;
/// let plan: TripPlan = serde_json::from_str(json).unwrap();
/// assert_eq!(plan.trip_type(), TripType::RoundTrip);
/// assert_eq!(plan.legs().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trip_type", rename_all = "snake_case")]
pub enum TripPlan {
    /// A one-way trip; the window ends at the end of the mission.
    OneWay {
        /// The single leg.
        leg: TripLeg,
    },
    /// A round trip to one destination.
    RoundTrip {
        /// The single leg.
        leg: TripLeg,
    },
    /// A trip visiting several destinations in order.
    MultiDestination {
        /// The legs, in travel order.
        legs: Vec<TripLeg>,
    },
}

impl TripPlan {
    /// Returns the trip type tag for this plan.
    pub fn trip_type(&self) -> TripType {
        match self {
            TripPlan::OneWay { .. } => TripType::OneWay,
            TripPlan::RoundTrip { .. } => TripType::RoundTrip,
            TripPlan::MultiDestination { .. } => TripType::MultiDestination,
        }
    }

    /// Returns the legs of this plan in travel order.
    pub fn legs(&self) -> &[TripLeg] {
        match self {
            TripPlan::OneWay { leg } | TripPlan::RoundTrip { leg } => std::slice::from_ref(leg),
            TripPlan::MultiDestination { legs } => legs,
        }
    }
}

/// A mission to calculate: who travels, under which authorization, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRequest {
    /// The traveler's name.
    pub traveler: String,
    /// The travel authorization number.
    #[serde(default)]
    pub ta_number: String,
    /// The trip plan.
    pub trip: TripPlan,
}
