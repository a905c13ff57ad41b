//! Customer Service - Customer record HTTP API.
//!
//! This binary serves the customer API on port 8000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - In-memory customer store behind a single `RwLock`
//! - Sentry for error tracking, tracing for structured logs
//!
//! See [`customer_service::config`] for the environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use customer_service::config::ServiceConfig;
use customer_service::state::AppState;
use customer_service::telemetry;

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ServiceConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&config.sentry);

    telemetry::init_tracing(&config);
    tracing::debug!(?config, "Configuration loaded");

    let state = AppState::new(config.clone());
    let app = customer_service::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("customer service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Peer addresses feed the rate limiter when no proxy headers are present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
