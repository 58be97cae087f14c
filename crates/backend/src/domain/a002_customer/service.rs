use contracts::domain::a002_customer::aggregate::{Customer, CustomerDto};

use crate::shared::data::CollectionStore;
use crate::shared::error::ServiceError;

pub async fn create(store: &CollectionStore, dto: CustomerDto) -> Result<Customer, ServiceError> {
    dto.validate().map_err(ServiceError::InvalidInput)?;

    let aggregate = Customer::new_for_insert(dto);
    let stored = store.append_as(&aggregate).await?;
    tracing::info!(customer_id = %stored.id, "Customer created");
    Ok(stored)
}

pub async fn list_all(store: &CollectionStore) -> Result<Vec<Customer>, ServiceError> {
    Ok(store.load_as::<Customer>().await?)
}
