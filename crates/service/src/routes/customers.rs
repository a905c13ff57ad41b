//! Customer API handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use customer_service_core::{Customer, CustomerId, NewCustomer};

use crate::error::Result;
use crate::state::AppState;

/// Create a new customer.
///
/// `POST /api/customers/`
///
/// # Errors
///
/// - 422 if the body is not JSON or a field is missing or not a string
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCustomer>, JsonRejection>,
) -> Result<Json<Customer>> {
    let Json(new) = payload?;
    let customer = state.customers().create(new).await?;

    Ok(Json(customer))
}

/// Retrieve a customer by ID.
///
/// `GET /api/customers/{customer_id}`
///
/// # Errors
///
/// - 422 if `customer_id` is not an integer
/// - 404 if no customer has this ID
pub async fn show(
    State(state): State<AppState>,
    customer_id: std::result::Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<Customer>> {
    let Path(customer_id) = customer_id?;
    let customer = state.customers().get(customer_id).await?;

    Ok(Json(customer))
}
