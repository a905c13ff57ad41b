//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Service banner
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check
//!
//! # Customers (rate limited)
//! POST /api/customers/                - Create a customer
//! POST /api/customers                 - Same, without the trailing slash
//! GET  /api/customers/{customer_id}   - Retrieve a customer by ID
//! ```

pub mod customers;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the health and banner routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
}

/// Create the customer API routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/customers/", post(customers::create))
        .route("/api/customers", post(customers::create))
        .route("/api/customers/{customer_id}", get(customers::show))
}
