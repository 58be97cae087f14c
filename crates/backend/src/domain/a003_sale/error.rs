use thiserror::Error;

use crate::shared::data::StoreError;

/// Ошибки проведения продажи
#[derive(Debug, Error)]
pub enum SaleError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Not enough stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl SaleError {
    /// Короткое имя вида ошибки для логов
    pub fn kind(&self) -> &'static str {
        match self {
            SaleError::InvalidInput(_) => "invalid_input",
            SaleError::ProductNotFound(_) => "product_not_found",
            SaleError::CustomerNotFound(_) => "customer_not_found",
            SaleError::InsufficientStock { .. } => "insufficient_stock",
            SaleError::Storage(_) => "storage_failure",
        }
    }

    /// Ошибка вызвана запросом (а не хранилищем)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SaleError::Storage(_))
    }
}
