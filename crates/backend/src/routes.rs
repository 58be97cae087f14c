use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::app_state::AppState;
use crate::handlers;
use crate::system::middleware::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Product
        .route(
            "/api/products",
            get(handlers::a001_product::list_all).post(handlers::a001_product::create),
        )
        .route(
            "/api/products/:id",
            put(handlers::a001_product::update).delete(handlers::a001_product::delete),
        )
        // A002 Customer
        .route(
            "/api/customers",
            get(handlers::a002_customer::list_all).post(handlers::a002_customer::create),
        )
        // A003 Sale
        .route(
            "/api/sales",
            get(handlers::a003_sale::list_all).post(handlers::a003_sale::create),
        )
        // Dashboards
        .route(
            "/api/dashboards/sales-summary",
            get(handlers::dashboards::sales_summary),
        )
        .route(
            "/api/dashboards/inventory-status",
            get(handlers::dashboards::inventory_status),
        )
        .with_state(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors())
}

/// Браузерный интерфейс работает на другом порту
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
