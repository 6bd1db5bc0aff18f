//! Travel authorization model.

use serde::{Deserialize, Serialize};

use super::TripType;

/// A registered travel authorization.
///
/// The TA number links mission, DSA and expense records together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelAuthorization {
    /// The traveler's name.
    pub name: String,
    /// The generated TA number (e.g. `TA-RHA-25-001`).
    pub ta_number: String,
    /// The kind of trip authorized.
    pub trip_type: TripType,
    /// Project code.
    #[serde(default)]
    pub project: String,
    /// Fund code.
    #[serde(default)]
    pub fund: String,
    /// Activity code.
    #[serde(default)]
    pub activity: String,
    /// Budget line.
    #[serde(default)]
    pub budget_line: String,
    /// Approving manager.
    #[serde(default)]
    pub manager: String,
    /// Focal point for the trip.
    #[serde(default)]
    pub focal_point: String,
    /// Issuing office.
    #[serde(default)]
    pub office: String,
}
