use axum::extract::State;
use axum::Json;
use contracts::dashboards::d400_sales_summary::SalesSummaryResponse;
use contracts::dashboards::d401_inventory_status::InventoryStatusResponse;

use super::{storage_error, ApiError};
use crate::app_state::AppState;
use crate::dashboards::{d400_sales_summary, d401_inventory_status};

/// GET /api/dashboards/sales-summary
pub async fn sales_summary(
    State(state): State<AppState>,
) -> Result<Json<SalesSummaryResponse>, ApiError> {
    d400_sales_summary::service::get_sales_summary(&state.store)
        .await
        .map(Json)
        .map_err(|e| storage_error(e, "Error building sales summary"))
}

/// GET /api/dashboards/inventory-status
pub async fn inventory_status(
    State(state): State<AppState>,
) -> Result<Json<InventoryStatusResponse>, ApiError> {
    d401_inventory_status::service::get_inventory_status(&state.store, state.low_stock_threshold)
        .await
        .map(Json)
        .map_err(|e| storage_error(e, "Error building inventory status"))
}
