use thiserror::Error;

/// Ошибки хранилища коллекций
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Collection '{collection}' I/O error: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection '{collection}' is malformed: {reason}")]
    Malformed { collection: String, reason: String },

    #[error("Record not found in '{collection}': {id}")]
    NotFound { collection: String, id: String },

    #[error("Record id already exists in '{collection}': {id}")]
    DuplicateId { collection: String, id: String },

    #[error("Could not generate a free id for '{collection}'")]
    IdExhausted { collection: String },
}

impl StoreError {
    pub fn io(collection: &str, source: std::io::Error) -> Self {
        StoreError::Io {
            collection: collection.to_string(),
            source,
        }
    }

    pub fn malformed(collection: &str, reason: impl ToString) -> Self {
        StoreError::Malformed {
            collection: collection.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Всё, кроме NotFound, означает, что операция с хранилищем не выполнена
    pub fn is_storage_failure(&self) -> bool {
        !matches!(self, StoreError::NotFound { .. })
    }
}
