use thiserror::Error;

use super::data::StoreError;

/// Ошибки сервисов справочников (товары, покупатели)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{element} not found: {id}")]
    NotFound { element: &'static str, id: String },

    #[error("Storage failure: {0}")]
    Storage(#[source] StoreError),
}

impl ServiceError {
    /// Перевести NotFound хранилища в NotFound конкретного агрегата
    pub fn from_store(element: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => ServiceError::NotFound { element, id },
            other => ServiceError::Storage(other),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::from_store("Record", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_keeps_element_name() {
        let err = ServiceError::from_store(
            "Product",
            StoreError::NotFound {
                collection: "products".into(),
                id: "p9".into(),
            },
        );
        assert_eq!(err.to_string(), "Product not found: p9");
    }

    #[test]
    fn test_other_store_errors_are_storage_failures() {
        let err: ServiceError = StoreError::malformed("products", "bad json").into();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
