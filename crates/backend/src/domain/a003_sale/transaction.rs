use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_customer::aggregate::Customer;
use contracts::domain::a003_sale::aggregate::Sale;
use contracts::domain::common::AggregateRoot;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::error::SaleError;
use crate::shared::data::{find_index, from_record, Clock, CollectionStore};

const QUANTITY_FIELD: &str = "quantity";

/// Проведение продажи: проверка товара, покупателя и остатка, списание
/// остатка и запись в журнал продаж.
///
/// Остаток сохраняется раньше, чем запись продажи. Если запись продажи не
/// удалась, остаток остаётся списанным без продажи в журнале: компенсации
/// нет, такой случай пишется в лог уровня error.
#[derive(Clone)]
pub struct SaleTransaction {
    store: CollectionStore,
    clock: Arc<dyn Clock>,
}

impl SaleTransaction {
    pub fn new(store: CollectionStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[instrument(name = "sale_transaction", skip(self))]
    pub async fn execute(
        &self,
        product_id: &str,
        customer_id: &str,
        quantity: i64,
    ) -> Result<Sale, SaleError> {
        let result = self.run(product_id, customer_id, quantity).await;
        match &result {
            Ok(sale) => info!(
                sale_id = %sale.id,
                product_id = %sale.product_id,
                quantity = sale.quantity,
                amount = sale.amount,
                "Sale recorded"
            ),
            Err(e) if e.is_client_error() => warn!(kind = e.kind(), error = %e, "Sale rejected"),
            Err(e) => error!(kind = e.kind(), error = %e, "Sale failed"),
        }
        result
    }

    async fn run(
        &self,
        product_id: &str,
        customer_id: &str,
        quantity: i64,
    ) -> Result<Sale, SaleError> {
        // 1. Ввод проверяется до обращения к хранилищу
        let quantity = validate_input(product_id, customer_id, quantity)?;

        // 2. Один снимок товаров и покупателей
        let products_collection = Product::collection_name();
        let customers_collection = Customer::collection_name();
        let mut products = self.store.load(products_collection).await?;
        let customers = self.store.load(customers_collection).await?;

        // 3-4. Сначала только наличие записей, поля читаются после
        let product_index = find_index(&products, product_id)
            .ok_or_else(|| SaleError::ProductNotFound(product_id.to_string()))?;
        let customer_index = find_index(&customers, customer_id)
            .ok_or_else(|| SaleError::CustomerNotFound(customer_id.to_string()))?;

        let product: Product = from_record(products_collection, products[product_index].clone())?;
        let customer: Customer =
            from_record(customers_collection, customers[customer_index].clone())?;

        // 5. Остаток
        if !product.has_stock_for(quantity) {
            return Err(SaleError::InsufficientStock {
                requested: quantity,
                available: product.quantity,
            });
        }

        // 6. Списание; остальные товары записываются без изменений
        let remaining = product.quantity - quantity;
        products[product_index].insert(QUANTITY_FIELD.to_string(), Value::from(remaining));
        self.store.save(products_collection, &products).await?;

        // 7-8. Сумма по сохранённой цене, имена фиксируются на момент продажи
        let sale = Sale {
            id: String::new(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            quantity,
            date: self.clock.now().into(),
            amount: product.price * f64::from(quantity),
        };

        match self.store.append_as(&sale).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                error!(
                    product_id = %product.id,
                    quantity,
                    remaining,
                    "Stock was deducted but the sale could not be recorded"
                );
                Err(e.into())
            }
        }
    }
}

fn validate_input(product_id: &str, customer_id: &str, quantity: i64) -> Result<u32, SaleError> {
    if product_id.trim().is_empty() {
        return Err(SaleError::InvalidInput("productId is required".into()));
    }
    if customer_id.trim().is_empty() {
        return Err(SaleError::InvalidInput("customerId is required".into()));
    }
    if quantity < 1 {
        return Err(SaleError::InvalidInput(
            "quantity must be a positive integer".into(),
        ));
    }
    u32::try_from(quantity)
        .map_err(|_| SaleError::InvalidInput(format!("quantity is too large: {}", quantity)))
}
