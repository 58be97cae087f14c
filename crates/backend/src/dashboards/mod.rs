pub mod d400_sales_summary;
pub mod d401_inventory_status;
