mod aggregate_root;
pub mod serde_number;

pub use aggregate_root::*;

/// Имя поля, в котором хранится идентификатор записи коллекции
pub const RECORD_ID_FIELD: &str = "_id";
