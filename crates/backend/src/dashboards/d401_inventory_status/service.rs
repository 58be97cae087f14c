use contracts::dashboards::d401_inventory_status::{
    InventoryStatusResponse, InventoryStatusRow, StockStatus,
};
use contracts::domain::a001_product::aggregate::Product;

use crate::shared::data::{CollectionStore, StoreError};

/// Get inventory status for every product in catalogue order
pub async fn get_inventory_status(
    store: &CollectionStore,
    threshold: u32,
) -> Result<InventoryStatusResponse, StoreError> {
    let products = store.load_as::<Product>().await?;

    let rows: Vec<InventoryStatusRow> = products
        .into_iter()
        .map(|p| InventoryStatusRow {
            status: StockStatus::classify(p.quantity, threshold),
            product_id: p.id,
            product_name: p.name,
            category: p.category,
            quantity: p.quantity,
        })
        .collect();

    let low_stock_count = rows
        .iter()
        .filter(|row| row.status == StockStatus::Low)
        .count();

    Ok(InventoryStatusResponse {
        threshold,
        low_stock_count,
        rows,
    })
}
