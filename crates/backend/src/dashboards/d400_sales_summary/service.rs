use contracts::dashboards::d400_sales_summary::SalesSummaryResponse;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_customer::aggregate::Customer;
use contracts::domain::a003_sale::aggregate::Sale;
use contracts::domain::common::AggregateRoot;

use crate::shared::data::{CollectionStore, StoreError};

/// Сводка по журналу продаж
pub async fn get_sales_summary(store: &CollectionStore) -> Result<SalesSummaryResponse, StoreError> {
    let sales = store.load_as::<Sale>().await?;
    // Справочники считаются по записям, без разбора полей
    let products_count = store.load(Product::collection_name()).await?.len();
    let customers_count = store.load(Customer::collection_name()).await?.len();

    let units_sold = sales.iter().map(|s| u64::from(s.quantity)).sum();
    let total_amount = sales.iter().map(|s| s.amount).sum();

    Ok(SalesSummaryResponse {
        sales_count: sales.len(),
        units_sold,
        total_amount,
        products_count,
        customers_count,
    })
}
