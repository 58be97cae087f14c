use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

/// Покупатель
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id", default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,
}

impl Customer {
    pub fn new_for_insert(dto: CustomerDto) -> Self {
        Self {
            id: String::new(),
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            phone: dto.phone.trim().to_string(),
        }
    }
}

impl AggregateRoot for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "customers"
    }

    fn element_name() -> &'static str {
        "Customer"
    }

    fn list_name() -> &'static str {
        "Customers"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDto {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl CustomerDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Customer name must not be empty".into());
        }
        Ok(())
    }
}
