//! Core types for the customer service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod timestamp;

pub use customer::{Customer, NewCustomer};
pub use id::*;
