//! Customer API tests.
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`,
//! covering the create and retrieve endpoints, their error responses and the
//! rate limiter on the `/api` routes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use chrono::{TimeZone, Utc};
use customer_service::{
    app,
    config::{RateLimitConfig, ServiceConfig},
    state::AppState,
};
use customer_service_core::{CustomerId, FixedClock};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router with the documented example setup: first ID 123, clock frozen at
/// 2025-01-15T10:30:00Z, rate limiting off.
fn example_app() -> Router {
    let config = ServiceConfig {
        first_customer_id: CustomerId::new(123),
        rate_limit: RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        },
        ..ServiceConfig::default()
    };
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap());
    app(AppState::with_clock(config, Arc::new(clock)))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

fn john() -> Value {
    json!({
        "email": "john@example.com",
        "first_name": "John",
        "last_name": "Doe"
    })
}

/// The documented example: create John Doe, then read him back.
#[tokio::test]
async fn create_then_get_matches_documented_example() {
    let app = example_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/customers/", &john()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let created = body_json(response).await;
    let expected = json!({
        "id": 123,
        "email": "john@example.com",
        "first_name": "John",
        "last_name": "Doe",
        "created_at": "2025-01-15T10:30:00Z"
    });
    assert_eq!(created, expected);

    let response = app.oneshot(get("/api/customers/123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, expected);
}

#[tokio::test]
async fn create_without_trailing_slash() {
    let response = example_app()
        .oneshot(post_json("/api/customers", &john()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 123);
}

#[tokio::test]
async fn create_assigns_increasing_ids() {
    let app = example_app();

    let first = body_json(
        app.clone()
            .oneshot(post_json("/api/customers/", &john()))
            .await
            .unwrap(),
    )
    .await;

    let jane = json!({
        "email": "jane@example.com",
        "first_name": "Jane",
        "last_name": "Roe"
    });
    let second = body_json(
        app.oneshot(post_json("/api/customers/", &jane))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["id"], 123);
    assert_eq!(second["id"], 124);
    assert_eq!(second["email"], "jane@example.com");
}

#[tokio::test]
async fn get_unknown_customer_is_not_found() {
    let response = example_app()
        .oneshot(get("/api/customers/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Customer not found"})
    );
}

#[tokio::test]
async fn get_non_integer_id_is_validation_error() {
    let response = example_app()
        .oneshot(get("/api/customers/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn create_missing_field_is_validation_error() {
    for missing in ["email", "first_name", "last_name"] {
        let mut body = john();
        body.as_object_mut().unwrap().remove(missing);

        let response = example_app()
            .oneshot(post_json("/api/customers/", &body))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing {missing} should be rejected"
        );
        let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(
            detail.contains(missing),
            "detail should name {missing}: {detail}"
        );
    }
}

#[tokio::test]
async fn create_stores_fields_verbatim() {
    let body = json!({
        "email": " john@example.com ",
        "first_name": " John ",
        "last_name": "Doe "
    });
    let app = example_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/customers/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_json(response).await;
    assert_eq!(created["email"], " john@example.com ");
    assert_eq!(created["first_name"], " John ");
    assert_eq!(created["last_name"], "Doe ");

    let response = app.oneshot(get("/api/customers/123")).await.unwrap();
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn create_accepts_any_string_values() {
    let body = json!({
        "email": "not-an-email",
        "first_name": "",
        "last_name": "   "
    });

    let response = example_app()
        .oneshot(post_json("/api/customers/", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "id": 123,
            "email": "not-an-email",
            "first_name": "",
            "last_name": "   ",
            "created_at": "2025-01-15T10:30:00Z"
        })
    );
}

#[tokio::test]
async fn create_non_string_field_is_validation_error() {
    let body = json!({
        "email": "john@example.com",
        "first_name": null,
        "last_name": "Doe"
    });

    let response = example_app()
        .oneshot(post_json("/api/customers/", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_invalid_json_is_validation_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/customers/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = example_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_without_json_content_type_is_validation_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/customers/")
        .body(Body::from(john().to_string()))
        .unwrap();

    let response = example_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_same_email_twice_gets_distinct_ids() {
    let app = example_app();

    let first = app
        .clone()
        .oneshot(post_json("/api/customers/", &john()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_json("/api/customers/", &john()))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    assert_eq!(body_json(first).await["id"], 123);
    assert_eq!(body_json(second).await["id"], 124);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let response = example_app()
        .oneshot(get("/api/customers/1"))
        .await
        .unwrap();

    let headers = response.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store, max-age=0");
}

#[tokio::test]
async fn rate_limiter_rejects_after_burst() {
    let config = ServiceConfig {
        rate_limit: RateLimitConfig {
            enabled: true,
            per_second: 60,
            burst_size: 2,
        },
        ..ServiceConfig::default()
    };
    let app = app(AppState::new(config));

    let request = || {
        Request::builder()
            .method("GET")
            .uri("/api/customers/1")
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::empty())
            .unwrap()
    };

    for _ in 0..2 {
        let response = app.clone().oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Too many requests"})
    );

    // Health routes are not rate limited
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-forwarded-for", "203.0.113.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn default_config_serves_api_without_connect_info() {
    let app = app(AppState::new(ServiceConfig::default()));

    let response = app
        .clone()
        .oneshot(get("/api/customers/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Customer not found"})
    );

    let response = app
        .oneshot(post_json("/api/customers/", &john()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 1);
}
