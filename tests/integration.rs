//! Integration tests for the DSA engine API.
//!
//! This test suite drives the router end to end:
//! - Round-trip, one-way and multi-destination calculations
//! - Departure and return boundary times
//! - Meal deductions and negative nets
//! - Mission recording, amendment and export
//! - Rate table browsing
//! - Travel authorizations, expense lines and meeting costs
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use dsa_engine::api::{AppState, create_router};
use dsa_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/dsa_2025").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

async fn send_json(router: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, text) = send(router, request).await;
    (status, serde_json::from_str(&text).unwrap())
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send_json(router, "POST", "/dsa/calculate", body).await
}

fn create_leg(country: &str, area: &str, departure: &str, return_at: &str) -> Value {
    json!({
        "country": country,
        "area": area,
        "departure": departure,
        "return": return_at
    })
}

fn round_trip(leg: Value) -> Value {
    json!({
        "traveler": "Rania Haddad",
        "ta_number": "TA-RHA-25-001",
        "trip": { "trip_type": "round_trip", "leg": leg }
    })
}

fn assert_decimal(actual: &Value, expected: &str) {
    let actual = actual.as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Allowance calculation
// =============================================================================

#[tokio::test]
async fn test_amman_three_day_trip_with_one_lunch() {
    let mut leg = create_leg("Jordan", "Amman", "2025-03-01T09:00:00", "2025-03-03T20:00:00");
    leg["deductions"] = json!({ "lunch": 1 });

    let (status, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["trip_type"], "round_trip");
    assert_eq!(result["currency"], "CHF");
    assert_eq!(result["legs"][0]["days_travelled"], 3);
    assert_decimal(&result["legs"][0]["gross_allowance"], "900");
    assert_decimal(&result["legs"][0]["breakdown"]["deduction_total"], "100");
    assert_decimal(&result["totals"]["net_allowance"], "800");
}

#[tokio::test]
async fn test_amman_without_deductions_nets_gross() {
    let leg = create_leg("Jordan", "Amman", "2025-03-01T09:00:00", "2025-03-03T20:00:00");

    let (_, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

    assert_decimal(&result["totals"]["gross_allowance"], "900");
    assert_decimal(&result["totals"]["net_allowance"], "900");
}

#[tokio::test]
async fn test_departure_boundaries() {
    let cases = [
        ("09:59:00", "full", "300"),
        ("10:00:00", "dinner_only", "200"),
        ("14:00:00", "dinner_only", "200"),
        ("14:01:00", "no_allowance", "0"),
    ];

    for (time, tier, amount) in cases {
        let leg = create_leg(
            "Jordan",
            "Amman",
            &format!("2025-03-01T{}", time),
            "2025-03-02T12:00:00",
        );
        let (status, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["legs"][0]["breakdown"]["departure_tier"], tier, "departure at {}", time);
        assert_decimal(&result["legs"][0]["breakdown"]["departure_amount"], amount);
    }
}

#[tokio::test]
async fn test_return_boundaries() {
    let cases = [
        ("19:01:00", "full", "300"),
        ("19:00:00", "lunch_only", "100"),
        ("13:00:00", "lunch_only", "100"),
        ("12:59:00", "no_allowance", "0"),
    ];

    for (time, tier, amount) in cases {
        let leg = create_leg(
            "Jordan",
            "Amman",
            "2025-03-01T15:00:00",
            &format!("2025-03-02T{}", time),
        );
        let (status, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["legs"][0]["breakdown"]["return_tier"], tier, "return at {}", time);
        assert_decimal(&result["legs"][0]["breakdown"]["return_amount"], amount);
        // Departure at 15:00 pays nothing, so gross is the return amount
        assert_decimal(&result["legs"][0]["gross_allowance"], amount);
    }
}

#[tokio::test]
async fn test_same_day_trip_counts_one_day() {
    let leg = create_leg("Lebanon", "Beirut", "2025-03-01T08:00:00", "2025-03-01T21:00:00");

    let (_, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

    assert_eq!(result["legs"][0]["days_travelled"], 1);
    assert_eq!(result["legs"][0]["breakdown"]["middle_days"], 0);
    assert_decimal(&result["legs"][0]["gross_allowance"], "561");
}

#[tokio::test]
async fn test_inverted_window_is_counted_as_one_day_with_warning() {
    let leg = create_leg("Jordan", "Amman", "2025-03-05T09:00:00", "2025-03-01T20:00:00");

    let (status, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["legs"][0]["days_travelled"], 1);
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "INVERTED_TRIP_WINDOW"));
}

#[tokio::test]
async fn test_negative_net_is_reported() {
    let mut leg = create_leg("Jordan", "Amman", "2025-03-01T15:00:00", "2025-03-02T12:00:00");
    leg["deductions"] = json!({ "full": 1 });

    let (status, result) = post_calculate(create_router_for_test(), round_trip(leg)).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["totals"]["net_allowance"], "-300");
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "NET_ALLOWANCE_NEGATIVE"));
}

#[tokio::test]
async fn test_one_way_trip() {
    let body = json!({
        "traveler": "Omar Said",
        "trip": {
            "trip_type": "one_way",
            "leg": create_leg("Egypt", "Cairo", "2025-04-10T07:30:00", "2025-04-12T18:00:00")
        }
    });

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["trip_type"], "one_way");
    assert_eq!(result["ta_number"], "");
    // 240 + 240 + 80
    assert_decimal(&result["totals"]["gross_allowance"], "560");
}

#[tokio::test]
async fn test_multi_destination_trip() {
    let mut amman = create_leg("Jordan", "Amman", "2025-03-01T09:00:00", "2025-03-03T20:00:00");
    amman["attachments_count"] = json!(2);
    let mut beirut = create_leg("Lebanon", "Beirut", "2025-03-04T11:00:00", "2025-03-06T14:00:00");
    beirut["deductions"] = json!({ "dinner": 1 });
    beirut["attachments_count"] = json!(1);

    let body = json!({
        "traveler": "Rania Haddad",
        "ta_number": "TA-RHA-25-002",
        "trip": { "trip_type": "multi_destination", "legs": [amman, beirut] }
    });

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["legs"].as_array().unwrap().len(), 2);
    // Beirut: 185.50 + 95 + 280.50 = 561, less one dinner 185.50
    assert_decimal(&result["legs"][1]["gross_allowance"], "561");
    assert_decimal(&result["legs"][1]["net_allowance"], "375.50");
    assert_decimal(&result["totals"]["net_allowance"], "1275.50");
    assert_eq!(result["totals"]["days_travelled"], 6);
    assert_eq!(result["totals"]["attachments_count"], 3);

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], index + 1);
    }
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_unknown_area_returns_404_and_records_nothing() {
    let state = create_test_state();
    let leg = create_leg("Jordan", "Petra", "2025-03-01T09:00:00", "2025-03-03T20:00:00");

    let (status, error) =
        send_json(create_router(state.clone()), "POST", "/missions", round_trip(leg)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RATE_NOT_FOUND");
    assert!(error["message"].as_str().unwrap().contains("Petra"));

    let (_, listed) = get(create_router(state), "/missions").await;
    let listed: Value = serde_json::from_str(&listed).unwrap();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failing_leg_aborts_whole_multi_destination_mission() {
    let state = create_test_state();
    let body = json!({
        "traveler": "Rania Haddad",
        "trip": {
            "trip_type": "multi_destination",
            "legs": [
                create_leg("Jordan", "Amman", "2025-03-01T09:00:00", "2025-03-03T20:00:00"),
                create_leg("Oman", "Muscat", "2025-03-04T09:00:00", "2025-03-05T20:00:00")
            ]
        }
    });

    let (status, _) = send_json(create_router(state.clone()), "POST", "/missions", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(state.missions().read().await.is_empty());
}

#[tokio::test]
async fn test_empty_multi_destination_returns_400() {
    let body = json!({
        "traveler": "Rania Haddad",
        "trip": { "trip_type": "multi_destination", "legs": [] }
    });

    let (status, error) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_TRIP");
}

#[tokio::test]
async fn test_unknown_trip_type_returns_400() {
    let body = json!({
        "traveler": "Rania Haddad",
        "trip": { "trip_type": "circular", "legs": [] }
    });

    let (status, error) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

// =============================================================================
// Mission records
// =============================================================================

#[tokio::test]
async fn test_record_list_amend_and_export() {
    let state = create_test_state();
    let mut leg = create_leg("Jordan", "Amman", "2025-03-01T09:00:00", "2025-03-03T20:00:00");
    leg["deductions"] = json!({ "lunch": 1 });
    leg["attachments_count"] = json!(1);

    let (status, recorded) =
        send_json(create_router(state.clone()), "POST", "/missions", round_trip(leg)).await;
    assert_eq!(status, StatusCode::CREATED);

    let record = &recorded["records"][0];
    assert_eq!(record["city"], "Amman");
    assert_eq!(record["days"], 3);
    assert_decimal(&record["total_dsa"], "800");
    let record_id = record["record_id"].as_str().unwrap().to_string();

    let (status, amended) = send_json(
        create_router(state.clone()),
        "PUT",
        &format!("/missions/{}", record_id),
        json!({ "attachments": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amended["supersedes"], record_id);
    assert_eq!(amended["attachments"], 4);

    let (_, listed) = get(create_router(state.clone()), "/missions").await;
    let listed: Value = serde_json::from_str(&listed).unwrap();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["record_id"], amended["record_id"]);

    // The original stays in the log, unchanged
    assert_eq!(state.missions().read().await.len(), 2);

    let (status, csv) = get(create_router(state), "/missions/export").await;
    assert_eq!(status, StatusCode::OK);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Name,TA,Country,City,Days,Total DSA,Attachments"
    );
    assert_eq!(
        lines.next().unwrap(),
        "Rania Haddad,TA-RHA-25-001,Jordan,Amman,3,800,4"
    );
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn test_export_sets_csv_headers() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/missions/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert!(
        response
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("missions.csv")
    );
}

#[tokio::test]
async fn test_amending_unknown_record_returns_404() {
    let (status, error) = send_json(
        create_router_for_test(),
        "PUT",
        "/missions/5f0c6a39-2c1e-4d55-9d7e-0a3c1f3b9e11",
        json!({ "days": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RECORD_NOT_FOUND");
}

// =============================================================================
// Rate table
// =============================================================================

#[tokio::test]
async fn test_countries_are_sorted_and_distinct() {
    let (status, body) = get(create_router_for_test(), "/rates/countries").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    let countries: Vec<&str> = body["countries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();

    let mut sorted = countries.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(countries, sorted);
    assert!(countries.contains(&"Jordan"));
}

#[tokio::test]
async fn test_areas_of_country() {
    let (status, body) = get(create_router_for_test(), "/rates/countries/Jordan/areas").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["country"], "Jordan");
    assert_eq!(body["areas"], json!(["Amman", "Aqaba", "Elsewhere"]));
}

#[tokio::test]
async fn test_areas_of_unknown_country_is_empty() {
    let (status, body) = get(create_router_for_test(), "/rates/countries/Atlantis/areas").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["areas"].as_array().unwrap().is_empty());
}

// =============================================================================
// Deduction counters
// =============================================================================

#[tokio::test]
async fn test_increment_deduction_counter() {
    let (status, counts) = send_json(
        create_router_for_test(),
        "POST",
        "/deductions/adjust",
        json!({
            "counts": { "lunch": 1, "dinner": 0, "full": 0 },
            "adjustment": { "kind": "lunch", "direction": "increment" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts, json!({ "lunch": 2, "dinner": 0, "full": 0 }));
}

#[tokio::test]
async fn test_decrementing_zero_counter_stays_zero() {
    let (status, counts) = send_json(
        create_router_for_test(),
        "POST",
        "/deductions/adjust",
        json!({ "adjustment": { "kind": "full", "direction": "decrement" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["full"], 0);
}

// =============================================================================
// Travel authorizations
// =============================================================================

#[tokio::test]
async fn test_travel_authorization_numbers_and_export() {
    let state = create_test_state();
    let request = json!({
        "name": "Rania Haddad",
        "trip_type": "round_trip",
        "year": 2025,
        "project": "P-100",
        "manager": "Samir Khoury",
        "office": "Amman"
    });

    let (status, first) = send_json(
        create_router(state.clone()),
        "POST",
        "/travel-authorizations",
        request.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["ta_number"], "TA-RHA-25-001");

    let (_, second) = send_json(
        create_router(state.clone()),
        "POST",
        "/travel-authorizations",
        request,
    )
    .await;
    assert_eq!(second["ta_number"], "TA-RHA-25-002");

    let (status, csv) = get(create_router(state), "/travel-authorizations/export").await;
    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Name,TA,Trip Type,Project,Fund,Activity,Budget,Manager,Focal Point,Office"
    );
    assert_eq!(
        lines[2],
        "Rania Haddad,TA-RHA-25-002,Round-trip,P-100,,,,Samir Khoury,,Amman"
    );
}

#[tokio::test]
async fn test_travel_authorization_requires_name() {
    let (status, error) = send_json(
        create_router_for_test(),
        "POST",
        "/travel-authorizations",
        json!({ "name": " ", "trip_type": "one_way" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
}

// =============================================================================
// Expenses and meetings
// =============================================================================

#[tokio::test]
async fn test_expense_line_is_coded_and_converted() {
    let (status, line) = send_json(
        create_router_for_test(),
        "POST",
        "/expenses/line",
        json!({
            "traveler": "Rania Haddad",
            "ta_number": "TA-RHA-25-001",
            "submission_date": "2025-03-06",
            "office": "Amman",
            "category": "room_fees",
            "currency": "EUR",
            "amount": "120.00",
            "exchange_rate": "0.9375"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(line["account_code"], "63000");
    assert_decimal(&line["amount_chf"], "112.50");
}

#[tokio::test]
async fn test_expense_with_zero_rate_is_rejected() {
    let (status, error) = send_json(
        create_router_for_test(),
        "POST",
        "/expenses/line",
        json!({
            "traveler": "Rania Haddad",
            "ta_number": "TA-RHA-25-001",
            "submission_date": "2025-03-06",
            "office": "Amman",
            "category": "taxi_fare",
            "currency": "USD",
            "amount": "20",
            "exchange_rate": "0"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_meeting_cost_total() {
    let (status, summary) = send_json(
        create_router_for_test(),
        "POST",
        "/meetings/cost",
        json!({
            "event_name": "Regional workshop",
            "mf_number": "MF-NARD-25-008",
            "participants": ["Rania Haddad", "Omar Said", ""],
            "per_pax_costs": [
                { "item": "hotel", "currency": "CHF", "amount_per_pax": "150" }
            ],
            "ground_transport": {
                "transfers": 2,
                "currency": "CHF",
                "amount_per_transfer": "80"
            },
            "other_expenses": [
                { "name": "Interpretation", "currency": "CHF", "amount": "500" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["pax"], 2);
    assert_eq!(summary["lines"].as_array().unwrap().len(), 3);
    // 300 + 160 + 500
    assert_decimal(&summary["total_chf"], "960");
}
