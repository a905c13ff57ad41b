//! Application state shared across handlers.

use std::sync::Arc;

use customer_service_core::{Clock, SystemClock};

use crate::config::ServiceConfig;
use crate::store::CustomerStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the customer store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServiceConfig,
    customers: CustomerStore,
}

impl AppState {
    /// Create application state backed by the system clock.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create application state with an explicit time source.
    ///
    /// The customer store starts empty and assigns IDs from
    /// `config.first_customer_id`.
    #[must_use]
    pub fn with_clock(config: ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let customers = CustomerStore::with_clock(config.first_customer_id, clock);

        Self {
            inner: Arc::new(AppStateInner { config, customers }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// Get a reference to the customer store.
    #[must_use]
    pub fn customers(&self) -> &CustomerStore {
        &self.inner.customers
    }
}
