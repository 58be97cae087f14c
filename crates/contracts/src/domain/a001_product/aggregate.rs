use crate::domain::common::serde_number;
use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================
/// Товар в каталоге точки продаж
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// Цена за единицу
    #[serde(deserialize_with = "serde_number::deserialize_f64")]
    pub price: f64,

    /// Текущий остаток на складе
    #[serde(deserialize_with = "serde_number::deserialize_u32")]
    pub quantity: u32,
}

impl Product {
    /// Новый товар без идентификатора (ID назначает хранилище при вставке)
    pub fn new_for_insert(dto: ProductDto) -> Self {
        Self {
            id: String::new(),
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            category: dto.category.trim().to_string(),
            price: dto.price,
            quantity: dto.quantity,
        }
    }

    pub fn has_stock_for(&self, requested: u32) -> bool {
        self.quantity >= requested
    }
}

impl AggregateRoot for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

// ============================================================================
// DTO
// ============================================================================
/// Тело запроса на создание товара
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "serde_number::deserialize_f64")]
    pub price: f64,
    #[serde(deserialize_with = "serde_number::deserialize_u32")]
    pub quantity: u32,
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name must not be empty".into());
        }
        validate_price(self.price)
    }
}

/// Частичное обновление товара: заданы только изменяемые поля
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_number::deserialize_opt_f64"
    )]
    pub price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_number::deserialize_opt_u32"
    )]
    pub quantity: Option<u32>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Product name must not be empty".into());
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("Invalid price: {}", price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_reads_legacy_record() {
        let json = r#"{"_id":"1700000000000","name":"Bread","price":10,"quantity":5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "1700000000000");
        assert_eq!(product.description, "");
        assert_eq!(product.price, 10.0);
        assert!(product.has_stock_for(5));
        assert!(!product.has_stock_for(6));
        assert!(product.is_persisted());
    }

    #[test]
    fn test_reads_form_strings() {
        let json = r#"{"_id":"1700000000000","name":"Bread","category":"Bakery","price":"10","quantity":"5"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, 10.0);
        assert_eq!(product.quantity, 5);

        let dto: ProductDto =
            serde_json::from_str(r#"{"name":"Milk","price":"1.5","quantity":"3"}"#).unwrap();
        assert_eq!(dto.price, 1.5);
        assert_eq!(dto.quantity, 3);

        let patch: ProductPatch = serde_json::from_str(r#"{"quantity":"12"}"#).unwrap();
        assert_eq!(patch.quantity, Some(12));
        assert_eq!(patch.price, None);
    }

    #[test]
    fn test_new_product_is_not_persisted() {
        let product = Product::new_for_insert(ProductDto {
            name: " Salt ".into(),
            price: 0.5,
            ..Default::default()
        });
        assert!(!product.is_persisted());
        assert_eq!(product.name, "Salt");
        assert_eq!(Product::full_name(), "a001_products");
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = ProductDto {
            name: "Milk".into(),
            price: 1.5,
            quantity: 3,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        dto.price = -1.0;
        assert!(dto.validate().is_err());

        dto.price = 1.0;
        dto.name = "   ".into();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ProductPatch {
            price: Some(12.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"price": 12.0}));
        assert!(!patch.is_empty());
        assert!(ProductPatch::default().is_empty());
    }
}
