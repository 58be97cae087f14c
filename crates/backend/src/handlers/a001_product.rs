use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a001_product::aggregate::{Product, ProductDto, ProductPatch};
use serde_json::json;

use super::{bad_json, service_error, ApiError};
use crate::app_state::AppState;
use crate::domain::a001_product;

/// GET /api/products
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    a001_product::service::list_all(&state.store)
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Error reading products"))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductDto>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(dto) = payload.map_err(bad_json)?;
    a001_product::service::create(&state.store, dto)
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Error saving product"))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(patch) = payload.map_err(bad_json)?;
    a001_product::service::update(&state.store, &id, patch)
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Error updating product"))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    a001_product::service::delete(&state.store, &id)
        .await
        .map_err(|e| service_error(e, "Error deleting product"))?;
    Ok(Json(json!({"message": "Deleted successfully"})))
}
