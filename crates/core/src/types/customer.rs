//! Customer record and its create input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CustomerId;

/// Input for creating a customer.
///
/// Every field must be present; values are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A stored customer record.
///
/// Serializes to exactly the five documented fields:
///
/// ```json
/// {
///   "id": 123,
///   "email": "john@example.com",
///   "first_name": "John",
///   "last_name": "Doe",
///   "created_at": "2025-01-15T10:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Build a record from create input plus store-assigned fields.
    #[must_use]
    pub fn from_new(id: CustomerId, new: NewCustomer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            created_at,
        }
    }
}
