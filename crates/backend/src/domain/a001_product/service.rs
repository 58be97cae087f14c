use contracts::domain::a001_product::aggregate::{Product, ProductDto, ProductPatch};
use contracts::domain::common::AggregateRoot;

use crate::shared::data::CollectionStore;
use crate::shared::error::ServiceError;

/// Создание нового товара
pub async fn create(store: &CollectionStore, dto: ProductDto) -> Result<Product, ServiceError> {
    dto.validate().map_err(ServiceError::InvalidInput)?;

    let aggregate = Product::new_for_insert(dto);
    let stored = store.append_as(&aggregate).await?;
    tracing::info!(product_id = %stored.id, name = %stored.name, "Product created");
    Ok(stored)
}

/// Частичное обновление товара (в том числе ручная корректировка остатка)
pub async fn update(
    store: &CollectionStore,
    id: &str,
    mut patch: ProductPatch,
) -> Result<Product, ServiceError> {
    patch.validate().map_err(ServiceError::InvalidInput)?;
    if patch.is_empty() {
        // Менять нечего: коллекция не перезаписывается
        return store
            .load_as::<Product>()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::NotFound {
                element: Product::element_name(),
                id: id.to_string(),
            });
    }
    patch.name = patch.name.map(|name| name.trim().to_string());

    store
        .update_as::<Product, _>(id, &patch)
        .await
        .map_err(|e| ServiceError::from_store(Product::element_name(), e))
}

/// Удаление товара; удаление несуществующего товара не ошибка
pub async fn delete(store: &CollectionStore, id: &str) -> Result<(), ServiceError> {
    let removed = store.delete_as::<Product>(id).await?;
    if !removed {
        tracing::debug!(product_id = %id, "Product already absent");
    }
    Ok(())
}

/// Получение списка всех товаров
pub async fn list_all(store: &CollectionStore) -> Result<Vec<Product>, ServiceError> {
    Ok(store.load_as::<Product>().await?)
}
