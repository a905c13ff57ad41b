//! Customer Service library.
//!
//! This crate provides the service as a library so the router can be tested
//! in-process and served by the `customer-service` binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;

use std::time::Duration;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the full application router.
///
/// Layers, outermost first: Sentry, `TraceLayer`, request ID, security
/// headers. The customer routes additionally sit behind the per-IP rate
/// limiter when it is enabled in configuration.
pub fn app(state: AppState) -> Router {
    let mut api = routes::customer_routes();
    if let Some(limiter) = middleware::api_rate_limiter(&state.config().rate_limit) {
        api = api
            .layer(limiter)
            .layer(axum::middleware::map_response(
                middleware::rate_limit_response,
            ));
    }

    Router::new()
        .merge(routes::health_routes())
        .merge(api)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
