//! Banner and health check handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Service banner body.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
}

/// Readiness body.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub customers: usize,
}

/// Service banner.
///
/// Returns `{"message": "Customer Service is running"}`.
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Customer Service is running",
    })
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn liveness() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// The store is in memory, so the service is ready once it can take the
/// store's read lock. Reports the number of stored customers.
pub async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ready",
        customers: state.customers().len().await,
    })
}
