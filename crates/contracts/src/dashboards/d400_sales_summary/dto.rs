use serde::{Deserialize, Serialize};

/// Response for sales summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummaryResponse {
    /// Number of records in the sales ledger
    pub sales_count: usize,
    /// Sum of `quantity` over all sales
    pub units_sold: u64,
    /// Sum of `amount` over all sales
    pub total_amount: f64,
    pub products_count: usize,
    pub customers_count: usize,
}
