use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Источник идентификаторов новых записей
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUID v4: коллизии практически исключены
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Источник текущего времени (дата продажи)
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use testing::*;
