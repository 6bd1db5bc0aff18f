//! HTTP request handlers for the DSA engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_meeting_cost, calculate_mission, prepare_expense_line};
use crate::error::EngineError;
use crate::models::{
    ExpenseEntry, MeetingCostRequest, MissionAmendment, MissionRecord, MissionRequest,
    TravelAuthorization,
};
use crate::records::{authorizations_to_csv, missions_to_csv};

use super::request::{DeductionAdjustRequest, TravelAuthorizationRequest};
use super::response::{ApiError, ApiErrorResponse, AreaList, CountryList, RecordedMission};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/dsa/calculate", post(calculate_handler))
        .route(
            "/missions",
            post(record_mission_handler).get(list_missions_handler),
        )
        .route("/missions/export", get(export_missions_handler))
        .route("/missions/:id", put(amend_mission_handler))
        .route("/rates/countries", get(list_countries_handler))
        .route("/rates/countries/:country/areas", get(list_areas_handler))
        .route("/deductions/adjust", post(adjust_deductions_handler))
        .route("/travel-authorizations", post(issue_authorization_handler))
        .route(
            "/travel-authorizations/export",
            get(export_authorizations_handler),
        )
        .route("/expenses/line", post(expense_line_handler))
        .route("/meetings/cost", post(meeting_cost_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(req)) => return Ok(req),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}

/// Logs an engine failure and converts it into an API error.
fn engine_failure(
    correlation_id: Uuid,
    context: &'static str,
) -> impl FnOnce(EngineError) -> ApiErrorResponse {
    move |err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "{}", context
        );
        err.into()
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// Handler for POST /dsa/calculate.
///
/// Calculates a mission without recording it.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<MissionRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing DSA calculation request");

    let request = json_body(payload, correlation_id)?;
    let calculation = calculate_mission(state.config().config(), &request)
        .map_err(engine_failure(correlation_id, "DSA calculation failed"))?;

    info!(
        correlation_id = %correlation_id,
        trip_type = %calculation.trip_type,
        legs = calculation.legs.len(),
        net_allowance = %calculation.totals.net_allowance,
        duration_us = calculation.audit_trace.duration_us,
        "Calculation completed successfully"
    );
    Ok(json_response(StatusCode::OK, calculation))
}

/// Handler for POST /missions.
///
/// Calculates a mission and appends one record per leg. Nothing is
/// appended if the calculation fails.
async fn record_mission_handler(
    State(state): State<AppState>,
    payload: Result<Json<MissionRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing mission recording request");

    let request = json_body(payload, correlation_id)?;
    let calculation = calculate_mission(state.config().config(), &request)
        .map_err(engine_failure(correlation_id, "Mission calculation failed"))?;

    let records = state
        .missions()
        .write()
        .await
        .record_calculation(&calculation);

    info!(
        correlation_id = %correlation_id,
        traveler = %calculation.traveler,
        ta_number = %calculation.ta_number,
        records = records.len(),
        net_allowance = %calculation.totals.net_allowance,
        "Mission recorded"
    );
    Ok(json_response(
        StatusCode::CREATED,
        RecordedMission {
            calculation,
            records,
        },
    ))
}

/// Handler for GET /missions.
///
/// Lists the current (non-superseded) mission records.
async fn list_missions_handler(State(state): State<AppState>) -> Response {
    let log = state.missions().read().await;
    let current: Vec<MissionRecord> = log.current().into_iter().cloned().collect();
    debug!(records = current.len(), "Listing mission records");
    json_response(StatusCode::OK, current)
}

/// Handler for PUT /missions/:id.
///
/// Appends a record that supersedes the given one.
async fn amend_mission_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<MissionAmendment>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let Path(id) = path.map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid record id"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;
    info!(correlation_id = %correlation_id, record_id = %id, "Processing mission amendment");

    let amendment = json_body(payload, correlation_id)?;
    let amended = state
        .missions()
        .write()
        .await
        .amend(id, &amendment)
        .map_err(engine_failure(correlation_id, "Mission amendment failed"))?;

    info!(
        correlation_id = %correlation_id,
        record_id = %amended.record_id,
        supersedes = %id,
        "Mission amended"
    );
    Ok(json_response(StatusCode::OK, amended))
}

/// Handler for GET /missions/export.
async fn export_missions_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let log = state.missions().read().await;
    let current = log.current();
    let rows = current.len();

    let body = missions_to_csv(current)
        .map_err(engine_failure(correlation_id, "Mission export failed"))?;

    info!(correlation_id = %correlation_id, rows, "Mission export generated");
    Ok(csv_response("missions.csv", body))
}

/// Handler for GET /rates/countries.
async fn list_countries_handler(State(state): State<AppState>) -> Response {
    let countries = state
        .config()
        .rates()
        .countries()
        .into_iter()
        .map(str::to_string)
        .collect();
    json_response(StatusCode::OK, CountryList { countries })
}

/// Handler for GET /rates/countries/:country/areas.
async fn list_areas_handler(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Response {
    let areas = state
        .config()
        .rates()
        .areas(&country)
        .into_iter()
        .map(str::to_string)
        .collect();
    json_response(StatusCode::OK, AreaList { country, areas })
}

/// Handler for POST /deductions/adjust.
///
/// Returns the adjusted counters; nothing is stored.
async fn adjust_deductions_handler(
    payload: Result<Json<DeductionAdjustRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;
    let adjusted = request.counts.apply(request.adjustment);

    debug!(
        correlation_id = %correlation_id,
        lunch = adjusted.lunch,
        dinner = adjusted.dinner,
        full = adjusted.full,
        "Deduction counters adjusted"
    );
    Ok(json_response(StatusCode::OK, adjusted))
}

/// Handler for POST /travel-authorizations.
///
/// Numbers a new travel authorization and adds it to the register.
async fn issue_authorization_handler(
    State(state): State<AppState>,
    payload: Result<Json<TravelAuthorizationRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing travel authorization request");

    let request = json_body(payload, correlation_id)?;
    let year = request.year.unwrap_or_else(|| Utc::now().year());
    let authorization: TravelAuthorization = request.into();

    let issued = state
        .authorizations()
        .write()
        .await
        .issue(authorization, year)
        .map_err(engine_failure(correlation_id, "Travel authorization failed"))?;

    info!(
        correlation_id = %correlation_id,
        ta_number = %issued.ta_number,
        "Travel authorization issued"
    );
    Ok(json_response(StatusCode::CREATED, issued))
}

/// Handler for GET /travel-authorizations/export.
async fn export_authorizations_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let register = state.authorizations().read().await;

    let body = authorizations_to_csv(register.all())
        .map_err(engine_failure(correlation_id, "Travel authorization export failed"))?;

    info!(
        correlation_id = %correlation_id,
        rows = register.all().len(),
        "Travel authorization export generated"
    );
    Ok(csv_response("travel_authorizations.csv", body))
}

/// Handler for POST /expenses/line.
async fn expense_line_handler(
    payload: Result<Json<ExpenseEntry>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let entry = json_body(payload, correlation_id)?;

    let line = prepare_expense_line(entry)
        .map_err(engine_failure(correlation_id, "Expense line rejected"))?;

    info!(
        correlation_id = %correlation_id,
        account_code = %line.account_code,
        amount_chf = %line.amount_chf,
        "Expense line prepared"
    );
    Ok(json_response(StatusCode::OK, line))
}

/// Handler for POST /meetings/cost.
async fn meeting_cost_handler(
    payload: Result<Json<MeetingCostRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let summary = calculate_meeting_cost(&request)
        .map_err(engine_failure(correlation_id, "Meeting costing failed"))?;

    info!(
        correlation_id = %correlation_id,
        event = %summary.event_name,
        pax = summary.pax,
        total_chf = %summary.total_chf,
        "Meeting cost calculated"
    );
    Ok(json_response(StatusCode::OK, summary))
}
