//! HTTP API module for the DSA engine.
//!
//! This module provides the REST API endpoints for calculating and recording
//! mission allowances, browsing the rate table, numbering travel
//! authorizations and costing expenses and meetings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionAdjustRequest, TravelAuthorizationRequest};
pub use response::{ApiError, ApiErrorResponse, AreaList, CountryList, RecordedMission};
pub use state::AppState;
