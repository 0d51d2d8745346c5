mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use contractor_dashboard_backend::routes::build_router;
use contractor_dashboard_backend::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{seed_bid, seed_contractor, seed_job, test_state, ADMIN_KEY};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn admin(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", ADMIN_KEY)
        .header("content-type", "application/json");
    builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap()
}

fn contractor(method: &str, uri: &str, contractor_id: i32, body: Option<Value>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-contractor-id", contractor_id.to_string())
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap()
}

async fn app_with_state() -> (Router, AppState) {
    let state = test_state().await;
    (build_router(state.clone()), state)
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app_with_state().await;

    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_admin_requires_api_key() {
    let (app, state) = app_with_state().await;
    let c = seed_contractor(&state.db, "Alpha Builders").await;

    let (missing, body) = send(
        &app,
        Request::builder()
            .uri("/api/admin/bids")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (wrong, _) = send(
        &app,
        Request::builder()
            .uri("/api/admin/bids")
            .header("x-api-key", "nope")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(wrong, StatusCode::UNAUTHORIZED);

    let (as_contractor, _) = send(&app, contractor("GET", "/api/admin/bids", c.id, None)).await;
    assert_eq!(as_contractor, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_without_configured_key() {
    let mut state = test_state().await;
    state.admin_api_key = None;
    let app = build_router(state);

    let (status, body) = send(&app, admin("GET", "/api/admin/jobs", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CONFIG_ERROR");
}

#[tokio::test]
async fn test_quote_uses_contractor_settings() {
    let (app, state) = app_with_state().await;
    let c = seed_contractor(&state.db, "Alpha Builders").await;

    let (status, _) = send(
        &app,
        contractor(
            "PUT",
            "/api/contractor/settings",
            c.id,
            Some(json!({
                "labor_rate": "50",
                "material_margin_pct": "10",
                "travel_cost": "0",
                "profit_margin_pct": "150"
            })),
        ),
    )
    .await;
    // Profit margin above 100 is refused by settings validation
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        contractor(
            "PUT",
            "/api/contractor/settings",
            c.id,
            Some(json!({
                "labor_rate": "50",
                "material_margin_pct": "10",
                "travel_cost": "0",
                "profit_margin_pct": "0"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &app,
        contractor(
            "POST",
            "/api/bids/quote",
            c.id,
            Some(json!({ "labor_hours": "4", "material_cost": "abc" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"]["labor_cost"], "200.00");
    assert_eq!(body["breakdown"]["material_total"], "0.00");
    assert_eq!(body["breakdown"]["total_bid"], "200.00");
}

#[tokio::test]
async fn test_submit_and_accept_flow() {
    let (app, state) = app_with_state().await;
    let job = seed_job(&state.db, "Kitchen remodel").await;
    let a = seed_contractor(&state.db, "Alpha Builders").await;
    let b = seed_contractor(&state.db, "Beta Works").await;

    let (status, body) = send(
        &app,
        contractor(
            "POST",
            &format!("/api/jobs/{}/bids", job.id),
            a.id,
            Some(json!({ "amount": "1200", "notes": "Two week turnaround" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Submitted");
    let bid_a = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        contractor(
            "POST",
            &format!("/api/jobs/{}/bids", job.id),
            a.id,
            Some(json!({ "amount": "1100" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_BID");

    let bid_b = seed_bid(&state.db, b.id, job.id, 1150).await;

    let (status, body) = send(
        &app,
        admin("POST", &format!("/api/admin/bids/{}/accept", bid_b.id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accepted"]["status"], "Accepted");
    assert_eq!(body["data"]["job"]["status"], "Awarded");
    assert_eq!(body["data"]["rejected"][0]["id"].as_i64(), Some(bid_a));

    let (status, body) = send(&app, contractor("GET", "/api/contractor/bids", a.id, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["bid"]["status"], "Rejected");
    assert_eq!(body[0]["job"]["title"], "Kitchen remodel");

    // Awarded jobs drop out of the contractor listing
    let (status, body) = send(&app, contractor("GET", "/api/jobs", a.id, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_accept_with_stale_revision_returns_conflict() {
    let (app, state) = app_with_state().await;
    let job = seed_job(&state.db, "Fence install").await;
    let a = seed_contractor(&state.db, "Alpha Builders").await;
    let b = seed_contractor(&state.db, "Beta Works").await;
    let bid_a = seed_bid(&state.db, a.id, job.id, 700).await;
    let bid_b = seed_bid(&state.db, b.id, job.id, 650).await;

    let (first, _) = send(
        &app,
        admin(
            "POST",
            &format!("/api/admin/bids/{}/accept?expected_revision={}", bid_a.id, job.revision),
            None,
        ),
    )
    .await;
    let (second, body) = send(
        &app,
        admin(
            "POST",
            &format!("/api/admin/bids/{}/accept?expected_revision={}", bid_b.id, job.revision),
            None,
        ),
    )
    .await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_set_status_endpoint() {
    let (app, state) = app_with_state().await;
    let job = seed_job(&state.db, "Gutter cleaning").await;
    let a = seed_contractor(&state.db, "Alpha Builders").await;
    let bid = seed_bid(&state.db, a.id, job.id, 200).await;
    let uri = format!("/api/admin/bids/{}/status", bid.id);

    let (status, body) = send(&app, admin("PUT", &uri, Some(json!({ "status": "UnderReview" })))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "UnderReview");

    let (status, body) = send(&app, admin("PUT", &uri, Some(json!({ "status": "Accepted" })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, admin("PUT", &uri, Some(json!({ "status": "Withdrawn" })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_job_lifecycle() {
    let (app, _) = app_with_state().await;

    let (status, body) = send(
        &app,
        admin(
            "POST",
            "/api/admin/jobs",
            Some(json!({
                "title": "Patio extension",
                "description": "Extend the rear patio by four metres",
                "location": "Shelbyville",
                "estimated_hours": "24"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Active");
    assert_eq!(body["data"]["job_type"], "Construction");
    let job_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/jobs?search=PATIO")
            .header("x-contractor-id", "1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"].as_i64(), Some(job_id));

    let (status, body) = send(
        &app,
        admin(
            "PUT",
            &format!("/api/admin/jobs/{}/status", job_id),
            Some(json!({ "status": "Cancelled" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revision"], 1);

    let (status, _) = send(&app, admin("DELETE", &format!("/api/admin/jobs/{}", job_id), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, admin("DELETE", &format!("/api/admin/jobs/{}", job_id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_contractor_duplicate_email() {
    let (app, _) = app_with_state().await;
    let payload = json!({ "email": "crew@example.com", "company_name": "Crew Ltd" });

    let (first, body) = send(&app, admin("POST", "/api/admin/contractors", Some(payload.clone()))).await;
    assert_eq!(first, StatusCode::CREATED);
    let contractor_id = body["data"]["id"].as_i64().unwrap() as i32;

    let (second, _) = send(&app, admin("POST", "/api/admin/contractors", Some(payload))).await;
    assert_eq!(second, StatusCode::CONFLICT);

    let (status, body) = send(&app, contractor("GET", "/api/contractor/settings", contractor_id, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auto_calculate_bids"], true);
}
