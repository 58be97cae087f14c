use contracts::domain::a003_sale::aggregate::Sale;

use crate::shared::data::{CollectionStore, StoreError};

/// Журнал продаж в порядке записи
pub async fn list_all(store: &CollectionStore) -> Result<Vec<Sale>, StoreError> {
    store.load_as::<Sale>().await
}
