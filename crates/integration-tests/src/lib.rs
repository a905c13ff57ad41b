//! Integration tests for the customer service.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p customer-service-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral `127.0.0.1` port with a
//! fresh in-memory store, then talks to it over real HTTP with `reqwest`.
//! No external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use customer_service::config::{RateLimitConfig, ServiceConfig};
use customer_service::state::AppState;
use customer_service_core::{CustomerId, FixedClock};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running customer service bound to a local ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    state: AppState,
    clock: FixedClock,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server configured like the documented example: first ID 123,
    /// clock frozen at 2025-01-15T10:30:00Z, rate limiting off.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let config = ServiceConfig {
            first_customer_id: CustomerId::new(123),
            rate_limit: RateLimitConfig {
                enabled: false,
                ..RateLimitConfig::default()
            },
            ..ServiceConfig::default()
        };
        Self::start_with(config, example_time()).await
    }

    /// Start a server with explicit configuration and clock start time.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_with(config: ServiceConfig, now: DateTime<Utc>) -> Self {
        let clock = FixedClock::new(now);
        let state = AppState::with_clock(config, Arc::new(clock.clone()));
        let app = customer_service::app(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server error");
        });

        Self {
            addr,
            state,
            clock,
            handle,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:54321`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Shared state of the running server.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Handle on the server's clock.
    #[must_use]
    pub const fn clock(&self) -> &FixedClock {
        &self.clock
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The timestamp used by the documented example.
///
/// # Panics
///
/// Never panics; the date is a valid constant.
#[must_use]
pub fn example_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0)
        .single()
        .expect("example timestamp is valid")
}
