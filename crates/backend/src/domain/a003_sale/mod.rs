pub mod error;
pub mod service;
pub mod transaction;

pub use error::SaleError;
pub use transaction::SaleTransaction;
