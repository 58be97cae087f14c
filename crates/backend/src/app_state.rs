use std::sync::Arc;

use crate::domain::a003_sale::SaleTransaction;
use crate::shared::config::{Config, StorageBackend};
use crate::shared::data::{
    Clock, CollectionStore, IdGenerator, JsonFileBackend, MemoryBackend, Persistence,
    SystemClock, UuidIdGenerator,
};

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub store: CollectionStore,
    pub sales: SaleTransaction,
    pub low_stock_threshold: u32,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn Persistence>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        low_stock_threshold: u32,
    ) -> Self {
        let store = CollectionStore::new(backend, ids);
        let sales = SaleTransaction::new(store.clone(), clock);
        Self {
            store,
            sales,
            low_stock_threshold,
        }
    }

    /// Собрать состояние по конфигурации: хранилище, UUID v4, системные часы
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend: Arc<dyn Persistence> = match config.storage.backend {
            StorageBackend::Json => {
                let backend = JsonFileBackend::open(config.data_dir()?).await?;
                tracing::info!("Collection storage directory: {}", backend.data_dir().display());
                Arc::new(backend)
            }
            StorageBackend::Memory => {
                tracing::warn!("Storage: in-memory, data is lost on restart");
                Arc::new(MemoryBackend::new())
            }
        };

        Ok(Self::new(
            backend,
            Arc::new(UuidIdGenerator),
            Arc::new(SystemClock),
            config.inventory.low_stock_threshold,
        ))
    }
}
