//! In-memory record storage.
//!
//! Customer records live in process memory for the lifetime of the server.
//! Each store keeps its whole record set behind a single `RwLock`; writes are
//! serialized, reads run concurrently.

pub mod customers;

use thiserror::Error;

pub use customers::CustomerStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// No more IDs can be assigned.
    #[error("id space exhausted")]
    IdExhausted,
}
