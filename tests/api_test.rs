//! Integration tests for API endpoints.
//!
//! The router runs over the in-memory store and the stub encoder, so no
//! database, Redis or face models are needed.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use face_auth_api::api::{create_router, AppState};
use face_auth_api::domain::EventSummary;

use common::{img_a1, img_a2, img_b, Harness};

const BOUNDARY: &str = "face-auth-test-boundary";

// =============================================================================
// Helpers
// =============================================================================

fn app(harness: &Harness) -> Router {
    create_router(AppState::from_container(&harness.services()))
}

fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"face_image\"; filename=\"face.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post_form(uri: &str, fields: &[(&str, &str)], image: Option<&[u8]>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, image)))
        .unwrap()
}

fn register_alice(image: &[u8]) -> Request<Body> {
    post_form(
        "/register",
        &[
            ("name", "Alice"),
            ("email", "a@x.com"),
            ("phone", "555-0100"),
            ("password", "Secret123"),
        ],
        Some(image),
    )
}

fn login_alice(password: &str, image: &[u8]) -> Request<Body> {
    post_form(
        "/login",
        &[("email", "a@x.com"), ("password", password)],
        Some(image),
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// =============================================================================
// Registration and login
// =============================================================================

#[tokio::test]
async fn test_alice_scenario() {
    let harness = Harness::new();
    let app = app(&harness);

    let (status, body) = send(&app, register_alice(&img_a1())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");

    let (status, body) = send(&app, login_alice("Secret123", &img_a2())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("face_template").is_none());

    let (status, body) = send(&app, login_alice("Secret123", &img_b())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_face_mismatch_looks_like_wrong_password() {
    let harness = Harness::new();
    let app = app(&harness);
    send(&app, register_alice(&img_a1())).await;

    let (mismatch_status, mismatch) = send(&app, login_alice("Secret123", &img_b())).await;
    let (wrong_status, wrong) = send(&app, login_alice("Not-the-password", &img_a1())).await;

    assert_eq!(mismatch_status, wrong_status);
    assert_eq!(mismatch, wrong);
    assert_eq!(wrong["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_duplicate_registration() {
    let harness = Harness::new();
    let app = app(&harness);

    send(&app, register_alice(&img_a1())).await;
    let (status, body) = send(&app, register_alice(&img_a1())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DUPLICATE_IDENTITY");
    assert_eq!(body["error"]["message"], "Email already exists");
    assert_eq!(harness.store.identities.count(), 1);
}

#[tokio::test]
async fn test_missing_field_is_rejected_before_any_work() {
    let harness = Harness::new();
    let app = app(&harness);

    let request = post_form(
        "/register",
        &[("name", "Alice"), ("email", "a@x.com"), ("password", "Secret123")],
        Some(&img_a1()),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "All fields are required");
    assert_eq!(harness.encoder.calls(), 0);
}

#[tokio::test]
async fn test_missing_image_is_rejected() {
    let harness = Harness::new();
    let app = app(&harness);

    let request = post_form(
        "/login",
        &[("email", "a@x.com"), ("password", "Secret123")],
        None,
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_invalid_email_and_short_password() {
    let harness = Harness::new();
    let app = app(&harness);

    let request = post_form(
        "/register",
        &[
            ("name", "Alice"),
            ("email", "not-an-email"),
            ("phone", "555-0100"),
            ("password", "Secret123"),
        ],
        Some(&img_a1()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let request = post_form(
        "/register",
        &[
            ("name", "Alice"),
            ("email", "a@x.com"),
            ("phone", "555-0100"),
            ("password", "short"),
        ],
        Some(&img_a1()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Password must be at least 8 characters");

    assert_eq!(harness.store.identities.count(), 0);
}

#[tokio::test]
async fn test_phone_wider_than_column_is_a_validation_error() {
    let harness = Harness::new();
    let app = app(&harness);

    let phone = "5".repeat(40);
    let request = post_form(
        "/register",
        &[
            ("name", "Alice"),
            ("email", "a@x.com"),
            ("phone", phone.as_str()),
            ("password", "Secret123"),
        ],
        Some(&img_a1()),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Phone must be at most 20 characters");
    assert_eq!(harness.encoder.calls(), 0);
    assert_eq!(harness.store.identities.count(), 0);
}

#[tokio::test]
async fn test_undecodable_image() {
    let harness = Harness::new();
    let app = app(&harness);

    let (status, body) = send(&app, register_alice(b"definitely not a png")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_IMAGE");
}

#[tokio::test]
async fn test_no_face_at_registration() {
    let harness = Harness::new();
    let app = app(&harness);

    let (status, body) = send(&app, register_alice(&common::face_png(10, 0))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "NO_FACE_DETECTED");
    assert_eq!(body["error"]["message"], "No face detected in the image");
}

// =============================================================================
// Events and probes
// =============================================================================

#[tokio::test]
async fn test_list_events_newest_first() {
    let event = |id: i32, title: &str, date: NaiveDate, attendees: i64| EventSummary {
        id,
        title: title.to_string(),
        description: None,
        date,
        location: "Main hall".to_string(),
        created_by: Some("Alice".to_string()),
        created_at: Utc::now(),
        attendees,
    };
    let harness = Harness::with_events(vec![
        event(1, "Kickoff", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 0),
        event(2, "Launch", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 4),
    ]);
    let app = app(&harness);

    let (status, body) = send(&app, get("/events")).await;

    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Launch");
    assert_eq!(events[0]["date"], "2024-06-01");
    assert_eq!(events[0]["attendees"], 4);
    assert_eq!(events[1]["attendees"], 0);
}

#[tokio::test]
async fn test_health_is_constant() {
    let harness = Harness::new();
    let app = app(&harness);

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Face recognition API is running");
}

#[tokio::test]
async fn test_ready_without_store_is_unavailable() {
    let harness = Harness::new();
    let app = app(&harness);

    let (status, body) = send(&app, get("/health/ready")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let harness = Harness::new();
    let app = app(&harness);

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/register").is_some());
}
