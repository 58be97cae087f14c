use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use contracts::domain::a003_sale::aggregate::{Sale, SaleRequest};

use super::{bad_json, sale_error, storage_error, ApiError};
use crate::app_state::AppState;
use crate::domain::a003_sale;

/// GET /api/sales
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Sale>>, ApiError> {
    a003_sale::service::list_all(&state.store)
        .await
        .map(Json)
        .map_err(|e| storage_error(e, "Error reading sales"))
}

/// POST /api/sales
///
/// Отсутствующие поля доходят до транзакции пустыми и отклоняются ею
/// как некорректный ввод.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SaleRequest>, JsonRejection>,
) -> Result<Json<Sale>, ApiError> {
    let Json(request) = payload.map_err(bad_json)?;
    let product_id = request.product_id.unwrap_or_default();
    let customer_id = request.customer_id.unwrap_or_default();
    let quantity = request.quantity.unwrap_or(0);

    state
        .sales
        .execute(&product_id, &customer_id, quantity)
        .await
        .map(Json)
        .map_err(sale_error)
}
