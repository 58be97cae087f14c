use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use contracts::domain::a002_customer::aggregate::{Customer, CustomerDto};

use super::{bad_json, service_error, ApiError};
use crate::app_state::AppState;
use crate::domain::a002_customer;

/// GET /api/customers
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    a002_customer::service::list_all(&state.store)
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Error reading customers"))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(dto) = payload.map_err(bad_json)?;
    a002_customer::service::create(&state.store, dto)
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Error saving customer"))
}
