//! End-to-end client tests against an in-process stub of the store API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use essence_client::{
    ApiClient, CashClosingWorkflow, ClientConfig, ClientError, SessionState,
};
use essence_core::{CashCheck, CoreError, Money, VarianceTier};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const TOKEN: &str = "test-token";

// =============================================================================
// Stub Server
// =============================================================================

#[derive(Default)]
struct Stub {
    session: Option<Value>,
    closings: Vec<Value>,
    request_ids: Vec<String>,
}

type Shared = Arc<Mutex<Stub>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn record_request_id(stub: &Shared, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        stub.lock().unwrap().request_ids.push(id.to_string());
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Token expired" })),
    )
        .into_response()
}

async fn health() -> &'static str {
    "ok"
}

async fn daily_summary(
    State(stub): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record_request_id(&stub, &headers);

    match query.get("date").map(String::as_str) {
        Some("2024-03-01") => Json(json!({
            "cashSales": 200000,
            "cardSales": "80000.00",
            "transferSales": 0,
            "creditSales": null,
            "totalIncome": 10000,
            "totalExpense": 30000.0,
            "totalPayments": 15000,
            "totalSales": 280000
        }))
        .into_response(),
        Some("2024-03-03") => Json(Value::Null).into_response(),
        Some("2024-03-04") => Json(json!({ "cashSales": -5, "totalSales": 10 })).into_response(),
        Some("2024-03-05") => Json(json!({ "cashSales": 1000, "totalSales": 1000 })).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "No summary" }))).into_response(),
    }
}

async fn active_session(State(stub): State<Shared>) -> Response {
    match stub.lock().unwrap().session.clone() {
        Some(session) => Json(session).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn open_session(State(stub): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut stub = stub.lock().unwrap();
    if stub.session.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "A session is already open" })),
        )
            .into_response();
    }

    let session = json!({
        "id": 7,
        "openingCash": body["openingCash"],
        "openedAt": "2024-03-01T08:00:00Z",
        "status": "open",
        "notes": body.get("notes").cloned().unwrap_or(Value::Null)
    });
    stub.session = Some(session.clone());
    (StatusCode::CREATED, Json(session)).into_response()
}

async fn close_session(
    State(stub): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut stub = stub.lock().unwrap();
    let Some(mut session) = stub.session.take() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    assert_eq!(session["id"].to_string(), id);

    session["status"] = json!("closed");
    session["closingCash"] = body["closingCash"].clone();
    session["closedAt"] = json!("2024-03-01T21:00:00Z");
    Json(session).into_response()
}

async fn submit_closing(
    State(stub): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_request_id(&stub, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["date"] == "2024-03-05" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Day already closed" })),
        )
            .into_response();
    }

    let mut record = body.clone();
    record["id"] = json!(format!("c-{}", stub.lock().unwrap().closings.len() + 1));
    record["createdAt"] = json!("2024-03-01T22:00:00Z");
    record["closedBy"] = json!("ana");
    stub.lock().unwrap().closings.push(body);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn closing_history(Query(query): Query<HashMap<String, String>>) -> Response {
    assert_eq!(query.get("from").map(String::as_str), Some("2024-03-01"));
    assert_eq!(query.get("to").map(String::as_str), Some("2024-03-31"));

    Json(json!({
        "data": [
            {
                "id": 1,
                "date": "2024-03-01T00:00:00Z",
                "openingCash": 50000,
                "closingCash": 200000,
                "systemCash": 215000,
                "difference": -15000,
                "createdAt": "2024-03-01T22:00:00Z"
            },
            {
                "id": "2",
                "date": "2024-03-02",
                "openingCash": "50000",
                "closingCash": 61000,
                "systemCash": 60000,
                "createdAt": "2024-03-02T22:00:00Z"
            }
        ]
    }))
    .into_response()
}

async fn closing_report(Path(date): Path<String>) -> Response {
    if date == "2024-03-01" {
        ([("content-type", "application/pdf")], b"%PDF-1.4 stub".to_vec()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn spawn_stub(session: Option<Value>) -> (String, Shared) {
    let stub: Shared = Arc::new(Mutex::new(Stub {
        session,
        ..Stub::default()
    }));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/reports/daily-summary", get(daily_summary))
        .route("/api/cash-sessions/active", get(active_session))
        .route("/api/cash-sessions/open", post(open_session))
        .route("/api/cash-sessions/{id}/close", post(close_session))
        .route("/api/cash-closings", post(submit_closing).get(closing_history))
        .route("/api/cash-closings/{date}/report.pdf", get(closing_report))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/"), stub)
}

fn open_session_json() -> Value {
    json!({
        "id": 7,
        "openingCash": 50000,
        "openedAt": "2024-03-01T08:00:00Z",
        "status": "open"
    })
}

fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    let mut config = ClientConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.token = token.map(str::to_string);
    config.api.timeout_secs = 5;
    ApiClient::new(&config, SessionState::new()).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_full_day_close_is_balanced() {
    let (url, stub) = spawn_stub(Some(open_session_json())).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    let day = workflow.load(date(1), None).await;
    assert_eq!(day.opening_cash, Money::from_units(50_000));
    assert_eq!(day.summary.as_ref().unwrap().card_sales.units(), 80_000);
    assert!(workflow.api().session().active_session().is_some());

    let entry = day.entry().with_count(Money::from_units(215_000));
    let check = workflow.preview(&day, &entry);
    let result = check.reconciliation().unwrap();
    assert_eq!(result.expected_cash.units(), 215_000);
    assert_eq!(result.tier, VarianceTier::Balanced);

    let record = workflow.submit(&day, &entry).await.unwrap();
    assert_eq!(record.id, "c-1");
    assert_eq!(record.date, date(1));
    assert!(record.difference.is_zero());

    let stub = stub.lock().unwrap();
    assert_eq!(stub.closings.len(), 1);
    let posted = &stub.closings[0];
    assert_eq!(posted["date"], "2024-03-01");
    assert_eq!(posted["openingCash"], 50_000);
    assert_eq!(posted["closingCash"], 215_000);
    assert_eq!(posted["systemCash"], 215_000);
    assert_eq!(posted["difference"], 0);

    assert!(stub.request_ids.len() >= 2);
    for id in &stub.request_ids {
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
    assert_ne!(stub.request_ids[0], stub.request_ids[1]);
}

#[tokio::test]
async fn test_missing_summary_blocks_submission() {
    let (url, stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    assert!(workflow.api().daily_summary(date(2)).await.unwrap().is_none());
    assert!(workflow.api().daily_summary(date(3)).await.unwrap().is_none());

    let day = workflow
        .load(date(2), Some(Money::from_units(50_000)))
        .await;
    assert!(day.summary.is_none());
    assert!(day.session.is_none());

    let entry = day.entry().with_count(Money::from_units(50_000));
    assert_eq!(workflow.preview(&day, &entry), CashCheck::NoData);

    let err = workflow.submit(&day, &entry).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Core(CoreError::NoSalesRecorded { .. })
    ));
    assert!(stub.lock().unwrap().closings.is_empty());
}

#[tokio::test]
async fn test_invalid_summary_is_rejected_at_the_boundary() {
    let (url, _stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    let err = workflow.api().daily_summary(date(4)).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidPayload { entity: "daily summary", .. }));

    let day = workflow.load(date(4), None).await;
    assert!(day.summary.is_none());
    assert!(day.opening_cash.is_zero());
}

#[tokio::test]
async fn test_unauthorized_submit() {
    let (url, _stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some("stale")));

    let day = workflow.load(date(1), Some(Money::from_units(50_000))).await;
    let entry = day.entry().with_count(Money::from_units(215_000));

    match workflow.submit(&day, &entry).await.unwrap_err() {
        ClientError::Unauthorized(message) => assert_eq!(message, "Token expired"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_conflict_surfaces_server_message() {
    let (url, _stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    let day = workflow.load(date(5), None).await;
    let entry = day.entry().with_count(Money::from_units(1_000));

    let err = workflow.submit(&day, &entry).await.unwrap_err();
    match &err {
        ClientError::Status { status, message } => {
            assert_eq!(*status, 409);
            assert_eq!(message, "Day already closed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_transient());
    assert_eq!(err.user_message(), "Day already closed");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (url, _stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    let err = workflow
        .close_session(Money::from_units(1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::SessionNotOpen)));

    let session = workflow
        .open_session(Money::from_units(50_000), Some("  morning float "))
        .await
        .unwrap();
    assert_eq!(session.id, "7");
    assert!(session.is_open());
    assert_eq!(session.notes.as_deref(), Some("morning float"));

    let err = workflow
        .open_session(Money::from_units(10), None)
        .await
        .unwrap_err();
    match err {
        ClientError::Core(CoreError::SessionAlreadyOpen { id }) => assert_eq!(id, "7"),
        other => panic!("unexpected error: {other:?}"),
    }

    let closed = workflow
        .close_session(Money::from_units(214_000), None)
        .await
        .unwrap();
    assert!(!closed.is_open());
    assert_eq!(closed.closing_cash, Some(Money::from_units(214_000)));
    assert!(workflow.api().session().active_session().is_none());
}

#[tokio::test]
async fn test_negative_opening_is_rejected_locally() {
    let (url, stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    let err = workflow
        .open_session(Money::from_units(-1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::Validation(_))));
    assert!(stub.lock().unwrap().session.is_none());
}

#[tokio::test]
async fn test_closing_history() {
    let (url, _stub) = spawn_stub(None).await;
    let api = client(&url, Some(TOKEN));

    let records = api.closing_history(date(1), date(31)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "1");
    assert_eq!(records[0].date, date(1));
    assert_eq!(records[0].difference.units(), -15_000);
    assert_eq!(records[1].opening_cash.units(), 50_000);
    assert_eq!(records[1].difference.units(), 1_000);

    let err = api.closing_history(date(31), date(1)).await.unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn test_download_report() {
    let (url, _stub) = spawn_stub(None).await;
    let workflow = CashClosingWorkflow::new(client(&url, Some(TOKEN)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join(essence_client::report_file_name(date(1)));

    let written = workflow.download_report(date(1), &path).await.unwrap();
    assert_eq!(written, path);
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-1.4 stub");

    let err = workflow
        .download_report(date(2), &dir.path().join("missing.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_health_and_unreachable_server() {
    let (url, _stub) = spawn_stub(None).await;
    assert!(client(&url, None).health().await.is_ok());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/api"), None)
        .health()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.is_transient());
}
