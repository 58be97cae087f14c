use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::error::StoreError;

/// Запись коллекции: плоский JSON-объект
pub type Record = Map<String, Value>;

/// Внешний носитель коллекций: чтение и полная перезапись по имени
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Прочитать коллекцию целиком. `None`, если коллекция ещё не создана.
    async fn load(&self, collection: &str) -> Result<Option<Vec<Record>>, StoreError>;

    /// Полностью заменить содержимое коллекции
    async fn save(&self, collection: &str, records: &[Record]) -> Result<(), StoreError>;
}

// ============================================================================
// JSON files
// ============================================================================

/// Одна коллекция = один файл `<data_dir>/<collection>.json` с JSON-массивом
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    /// Создаёт каталог данных, если его ещё нет
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| StoreError::io("*", e))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl Persistence for JsonFileBackend {
    async fn load(&self, collection: &str) -> Result<Option<Vec<Record>>, StoreError> {
        let path = self.collection_path(collection);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(collection, e)),
        };

        let records: Vec<Record> = serde_json::from_str(&contents)
            .map_err(|e| StoreError::malformed(collection, e))?;
        Ok(Some(records))
    }

    async fn save(&self, collection: &str, records: &[Record]) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::malformed(collection, e))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| StoreError::io(collection, e))?;
        tracing::debug!(collection, records = records.len(), "Collection saved");
        Ok(())
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Коллекции в памяти процесса (для тестов и временных стендов)
#[derive(Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Persistence for MemoryBackend {
    async fn load(&self, collection: &str) -> Result<Option<Vec<Record>>, StoreError> {
        Ok(self.collections.lock().await.get(collection).cloned())
    }

    async fn save(&self, collection: &str, records: &[Record]) -> Result<(), StoreError> {
        self.collections
            .lock()
            .await
            .insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}
