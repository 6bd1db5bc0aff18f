//! Request types for the DSA engine API.
//!
//! Mission, expense and meeting endpoints take the domain types directly;
//! this module holds the bodies that only exist at the HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::models::{DeductionAdjustment, DeductionCounts, TravelAuthorization, TripType};

/// Request body for `POST /deductions/adjust`.
///
/// The caller owns the counters; the endpoint returns the adjusted copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionAdjustRequest {
    /// The current counters. Defaults to all zero.
    #[serde(default)]
    pub counts: DeductionCounts,
    /// The adjustment to apply.
    pub adjustment: DeductionAdjustment,
}

/// Request body for `POST /travel-authorizations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelAuthorizationRequest {
    /// The traveler's name.
    pub name: String,
    /// The kind of trip authorized.
    pub trip_type: TripType,
    /// The year the number is issued for. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
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

impl From<TravelAuthorizationRequest> for TravelAuthorization {
    fn from(req: TravelAuthorizationRequest) -> Self {
        TravelAuthorization {
            name: req.name.trim().to_string(),
            ta_number: String::new(),
            trip_type: req.trip_type,
            project: req.project,
            fund: req.fund,
            activity: req.activity,
            budget_line: req.budget_line,
            manager: req.manager,
            focal_point: req.focal_point,
            office: req.office,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjustmentDirection, DeductionKind};

    #[test]
    fn test_adjust_request_defaults_counts() {
        let json = r#"{ "adjustment": { "kind": "lunch", "direction": "increment" } }"#;
        let request: DeductionAdjustRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.counts, DeductionCounts::default());
        assert_eq!(request.adjustment.kind, DeductionKind::Lunch);
        assert_eq!(request.adjustment.direction, AdjustmentDirection::Increment);
    }

    #[test]
    fn test_authorization_request_conversion() {
        let json = r#"{
            "name": "  Rania Haddad ",
            "trip_type": "round_trip",
            "project": "P-100",
            "office": "Amman"
        }"#;
        let request: TravelAuthorizationRequest = serde_json::from_str(json).unwrap();
        assert!(request.year.is_none());

        let authorization: TravelAuthorization = request.into();
        assert_eq!(authorization.name, "Rania Haddad");
        assert_eq!(authorization.trip_type, TripType::RoundTrip);
        assert_eq!(authorization.project, "P-100");
        assert!(authorization.ta_number.is_empty());
        assert!(authorization.manager.is_empty());
    }
}
