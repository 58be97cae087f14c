use crate::domain::common::serde_number;
use crate::domain::common::AggregateRoot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================
/// Продажа (запись журнала продаж)
///
/// Записи журнала неизменяемы. `productName` и `customerName` фиксируются
/// на момент продажи и не меняются при последующем переименовании товара
/// или покупателя.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(rename = "_id", default)]
    pub id: String,

    pub product_id: String,
    pub product_name: String,

    pub customer_id: String,
    pub customer_name: String,

    #[serde(deserialize_with = "serde_number::deserialize_u32")]
    pub quantity: u32,

    pub date: SaleDate,

    /// Сумма: цена товара на момент продажи × количество.
    /// В ранних записях журнала суммы нет, она читается как 0.
    #[serde(default, deserialize_with = "serde_number::deserialize_f64")]
    pub amount: f64,
}

/// Момент продажи
///
/// Новые продажи пишут RFC 3339 (UTC). Ранние записи журнала хранят дату
/// строкой в локальном формате браузера, она сохраняется как есть.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaleDate {
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl SaleDate {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            SaleDate::Timestamp(at) => Some(*at),
            SaleDate::Text(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for SaleDate {
    fn from(at: DateTime<Utc>) -> Self {
        SaleDate::Timestamp(at)
    }
}

impl AggregateRoot for Sale {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "sales"
    }

    fn element_name() -> &'static str {
        "Sale"
    }

    fn list_name() -> &'static str {
        "Sales"
    }
}

// ============================================================================
// DTO
// ============================================================================
/// Тело запроса POST /api/sales
///
/// Все поля необязательны на уровне десериализации, чтобы отсутствие поля
/// превращалось в понятную ошибку валидации, а не в отказ парсера.
/// Присланные клиентом `amount`, `productName` и прочие поля игнорируются.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub product_id: Option<String>,
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "serde_number::deserialize_opt_i64")]
    pub quantity: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sale_wire_format() {
        let sale = Sale {
            id: "s1".into(),
            product_id: "p1".into(),
            product_name: "Bread".into(),
            customer_id: "c1".into(),
            customer_name: "Alice".into(),
            quantity: 3,
            date: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap().into(),
            amount: 30.0,
        };
        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(value["_id"], "s1");
        assert_eq!(value["productId"], "p1");
        assert_eq!(value["customerName"], "Alice");
        assert_eq!(value["date"], "2025-01-02T03:04:05Z");

        let back: Sale = serde_json::from_value(value).unwrap();
        assert_eq!(back, sale);
    }

    #[test]
    fn test_request_ignores_client_amount() {
        let json = r#"{"productId":"p1","customerId":"c1","quantity":2,"amount":999}"#;
        let request: SaleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.product_id.as_deref(), Some("p1"));
        assert_eq!(request.quantity, Some(2));
    }

    #[test]
    fn test_request_quantity_from_form_string() {
        let json = r#"{"productId":"p1","customerId":"c1","quantity":"4"}"#;
        let request: SaleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.quantity, Some(4));

        let request: SaleRequest = serde_json::from_str(r#"{"productId":"p1"}"#).unwrap();
        assert_eq!(request.quantity, None);
    }

    #[test]
    fn test_reads_early_ledger_record() {
        let json = r#"{
            "_id": "1700000000123",
            "productId": "1700000000000",
            "productName": "Bread",
            "customerId": "1700000000050",
            "customerName": "Alice",
            "quantity": "2",
            "date": "3/1/2025, 12:00:00 PM"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.quantity, 2);
        assert_eq!(sale.amount, 0.0);
        assert_eq!(sale.date, SaleDate::Text("3/1/2025, 12:00:00 PM".into()));
        assert_eq!(sale.date.timestamp(), None);

        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(value["date"], "3/1/2025, 12:00:00 PM");
    }
}
