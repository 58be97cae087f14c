use serde::{Deserialize, Serialize};

/// Stock level classification of a single product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Quantity is below the configured threshold
    Low,
    InStock,
}

impl StockStatus {
    pub fn classify(quantity: u32, threshold: u32) -> Self {
        if quantity < threshold {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }
}

/// Single product row in the inventory status dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryStatusRow {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub status: StockStatus,
}

/// Response for inventory status dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryStatusResponse {
    /// Products with quantity below this value are reported as low
    pub threshold: u32,
    pub low_stock_count: usize,
    /// Rows in catalogue order
    pub rows: Vec<InventoryStatusRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_threshold_is_exclusive() {
        assert_eq!(StockStatus::classify(4, 5), StockStatus::Low);
        assert_eq!(StockStatus::classify(5, 5), StockStatus::InStock);
        assert_eq!(StockStatus::classify(0, 0), StockStatus::InStock);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&StockStatus::InStock).unwrap(),
            "\"in_stock\""
        );
    }
}
