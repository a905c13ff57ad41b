//! Customer store.
//!
//! Owns every [`Customer`] record. IDs are handed out sequentially and
//! `created_at` is stamped from the store's [`Clock`], truncated to whole
//! seconds so the stored value matches its wire representation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::SubsecRound;
use tokio::sync::RwLock;

use customer_service_core::{Clock, Customer, CustomerId, NewCustomer, SystemClock};

use super::StoreError;

/// Shared, cheaply cloneable customer store.
#[derive(Debug, Clone)]
pub struct CustomerStore {
    inner: Arc<RwLock<StoreInner>>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug)]
struct StoreInner {
    customers: BTreeMap<CustomerId, Customer>,
    /// `None` once the last representable ID has been handed out.
    next_id: Option<CustomerId>,
}

impl CustomerStore {
    /// Create an empty store that assigns IDs from 1 using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(CustomerId::new(1), Arc::new(SystemClock))
    }

    /// Create an empty store with an explicit first ID and time source.
    #[must_use]
    pub fn with_clock(first_id: CustomerId, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                customers: BTreeMap::new(),
                next_id: Some(first_id),
            })),
            clock,
        }
    }

    /// Store a new customer and return the stored record.
    ///
    /// ID assignment and insert happen under one write lock. Field values
    /// are stored as given; emails need not be unique.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IdExhausted` if no further ID can be assigned.
    pub async fn create(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id.ok_or(StoreError::IdExhausted)?;
        inner.next_id = id.checked_next();

        let created_at = self.clock.now().trunc_subsecs(0);
        let customer = Customer::from_new(id, new, created_at);
        inner.customers.insert(id, customer.clone());

        tracing::info!(customer_id = %id, "Customer created");
        Ok(customer)
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no customer has this ID.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, StoreError> {
        let inner = self.inner.read().await;
        let customer = inner.customers.get(&id).cloned();
        drop(inner);

        if customer.is_none() {
            tracing::debug!(customer_id = %id, "Customer not found");
        }
        customer.ok_or(StoreError::NotFound)
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.inner.read().await.customers.len()
    }

    /// Returns true if no customers are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.customers.is_empty()
    }
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}
