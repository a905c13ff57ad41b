//! Customer Service Core - Shared domain types.
//!
//! This crate provides the types used by the customer service and its tests:
//! - `service` - HTTP API and in-memory customer store
//! - `integration-tests` - Black-box tests against a running router
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Customer ID newtype and the [`Customer`] record
//! - [`clock`] - Time source abstraction used when stamping `created_at`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use types::*;
