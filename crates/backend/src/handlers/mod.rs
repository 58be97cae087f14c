pub mod a001_product;
pub mod a002_customer;
pub mod a003_sale;
pub mod dashboards;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::domain::a003_sale::SaleError;
use crate::shared::data::StoreError;
use crate::shared::error::ServiceError;

/// Ошибка обработчика: статус + тело `{"message": ...}`
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "message": message.into() })))
}

/// Тело запроса не разобрано: 400 вместо стандартного ответа axum
pub fn bad_json(rejection: JsonRejection) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Сбой хранилища: подробности только в лог, клиенту общий текст
pub fn storage_error(err: StoreError, public_message: &str) -> ApiError {
    if err.is_storage_failure() {
        tracing::error!(error = %err, "{}", public_message);
    } else {
        tracing::warn!(error = %err, "{}", public_message);
    }
    error_response(StatusCode::INTERNAL_SERVER_ERROR, public_message)
}

pub fn service_error(err: ServiceError, public_message: &str) -> ApiError {
    match err {
        ServiceError::InvalidInput(message) => error_response(StatusCode::BAD_REQUEST, message),
        e @ ServiceError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, e.to_string()),
        ServiceError::Storage(e) => storage_error(e, public_message),
    }
}

pub fn sale_error(err: SaleError) -> ApiError {
    match err {
        SaleError::Storage(e) => storage_error(e, "Error saving sale"),
        e => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}
