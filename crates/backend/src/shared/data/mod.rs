pub mod collection_store;
pub mod error;
pub mod id_generator;
pub mod persistence;

pub use collection_store::*;
pub use error::*;
pub use id_generator::*;
pub use persistence::*;
