use contracts::domain::common::{AggregateRoot, RECORD_ID_FIELD};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::error::StoreError;
use super::id_generator::IdGenerator;
use super::persistence::{Persistence, Record};

/// Сколько раз пробуем получить свободный ID, прежде чем сдаться
const MAX_ID_ATTEMPTS: usize = 16;

/// Хранилище именованных коллекций записей
///
/// Примитивы носителя: чтение коллекции целиком и полная перезапись.
/// Остальные операции (append, update, delete) строятся поверх них по схеме
/// load → изменение в памяти → save. Блокировок нет: два параллельных
/// изменения одной коллекции могут затереть друг друга.
#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn Persistence>,
    ids: Arc<dyn IdGenerator>,
}

impl CollectionStore {
    pub fn new(backend: Arc<dyn Persistence>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { backend, ids }
    }

    /// Все записи коллекции в порядке вставки.
    /// Отсутствующая коллекция создаётся пустой.
    pub async fn load(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        match self.backend.load(collection).await? {
            Some(records) => Ok(records),
            None => {
                tracing::info!(collection, "Collection does not exist yet, creating it empty");
                self.backend.save(collection, &[]).await?;
                Ok(Vec::new())
            }
        }
    }

    /// Полностью заменить содержимое коллекции
    pub async fn save(&self, collection: &str, records: &[Record]) -> Result<(), StoreError> {
        self.backend.save(collection, records).await
    }

    /// Добавить запись в конец коллекции.
    ///
    /// Запись без `_id` получает новый идентификатор, которого ещё нет в
    /// коллекции. Запись с уже существующим `_id` отклоняется.
    pub async fn append(&self, collection: &str, mut record: Record) -> Result<Record, StoreError> {
        let mut records = self.load(collection).await?;

        match record_id(&record) {
            Some(id) => {
                if find_index(&records, id).is_some() {
                    return Err(StoreError::DuplicateId {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    });
                }
            }
            None => {
                let id = self.fresh_id(collection, &records)?;
                record.insert(RECORD_ID_FIELD.to_string(), Value::String(id));
            }
        }

        records.push(record.clone());
        self.save(collection, &records).await?;
        Ok(record)
    }

    /// Поверхностно слить `partial` поверх записи с данным ID.
    /// Поля, которых нет в `partial`, сохраняются; `_id` не меняется.
    pub async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> Result<Record, StoreError> {
        self.merge_and_save(collection, id, partial, |merged| Ok(merged.clone()))
            .await
    }

    /// Слить `partial` в запись и проверить результат через `check`.
    /// Если `check` вернул ошибку, коллекция не перезаписывается.
    async fn merge_and_save<R>(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
        check: impl FnOnce(&Record) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut records = self.load(collection).await?;
        let index = find_index(&records, id).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;

        let record = &mut records[index];
        for (field, value) in partial {
            if field != RECORD_ID_FIELD {
                record.insert(field, value);
            }
        }
        let result = check(record)?;

        self.save(collection, &records).await?;
        Ok(result)
    }

    /// Удалить запись, если она есть. Повторное удаление не ошибка.
    /// Возвращает `true`, если запись была удалена.
    pub async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut records = self.load(collection).await?;
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        let removed = records.len() != before;

        self.save(collection, &records).await?;
        Ok(removed)
    }

    fn fresh_id(&self, collection: &str, records: &[Record]) -> Result<String, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !id.is_empty() && find_index(records, &id).is_none() {
                return Ok(id);
            }
            tracing::warn!(collection, id = %id, "Generated id is already taken, retrying");
        }
        Err(StoreError::IdExhausted {
            collection: collection.to_string(),
        })
    }

    // ============================================================================
    // Типизированные операции над агрегатами
    // ============================================================================

    pub async fn load_as<T>(&self) -> Result<Vec<T>, StoreError>
    where
        T: AggregateRoot + DeserializeOwned,
    {
        let collection = T::collection_name();
        let items = self
            .load(collection)
            .await?
            .into_iter()
            .map(|record| from_record(collection, record))
            .collect::<Result<Vec<T>, _>>()?;
        tracing::debug!("{} loaded: {}", T::list_name(), items.len());
        Ok(items)
    }

    pub async fn append_as<T>(&self, item: &T) -> Result<T, StoreError>
    where
        T: AggregateRoot + Serialize + DeserializeOwned,
    {
        let collection = T::collection_name();
        let record = to_record(collection, item)?;
        let stored = self.append(collection, record).await?;
        tracing::debug!(aggregate = %T::full_name(), "{} appended", T::element_name());
        from_record(collection, stored)
    }

    pub async fn update_as<T, P>(&self, id: &str, patch: &P) -> Result<T, StoreError>
    where
        T: AggregateRoot + DeserializeOwned,
        P: Serialize,
    {
        let collection = T::collection_name();
        let partial = to_record(collection, patch)?;
        self.merge_and_save(collection, id, partial, |merged| {
            from_record(collection, merged.clone())
        })
        .await
    }

    pub async fn delete_as<T: AggregateRoot>(&self, id: &str) -> Result<bool, StoreError> {
        self.delete_by_id(T::collection_name(), id).await
    }
}

/// Идентификатор записи: непустая строка в поле `_id`
pub fn record_id(record: &Record) -> Option<&str> {
    match record.get(RECORD_ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => Some(id.as_str()),
        _ => None,
    }
}

pub fn find_index(records: &[Record], id: &str) -> Option<usize> {
    records.iter().position(|r| record_id(r) == Some(id))
}

pub fn from_record<T: DeserializeOwned>(collection: &str, record: Record) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(record)).map_err(|e| StoreError::malformed(collection, e))
}

pub fn to_record<T: Serialize>(collection: &str, item: &T) -> Result<Record, StoreError> {
    match serde_json::to_value(item).map_err(|e| StoreError::malformed(collection, e))? {
        Value::Object(record) => Ok(record),
        other => Err(StoreError::malformed(
            collection,
            format!("expected an object, got {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::{JsonFileBackend, MemoryBackend, ScriptedIds, SequentialIds};
    use contracts::domain::a001_product::aggregate::{Product, ProductPatch};
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    fn memory_store() -> CollectionStore {
        CollectionStore::new(
            Arc::new(MemoryBackend::new()),
            Arc::new(SequentialIds::new("id")),
        )
    }

    #[tokio::test]
    async fn test_load_creates_missing_collection() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(dir.path()).await.unwrap();
        let store = CollectionStore::new(Arc::new(backend), Arc::new(SequentialIds::new("id")));

        assert!(store.load("products").await.unwrap().is_empty());

        let contents = std::fs::read_to_string(dir.path().join("products.json")).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&contents).unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_save_overwrites_instead_of_merging() {
        let store = memory_store();
        store
            .save("customers", &[record(json!({"_id": "1"})), record(json!({"_id": "2"}))])
            .await
            .unwrap();
        store
            .save("customers", &[record(json!({"_id": "3"}))])
            .await
            .unwrap();

        let loaded = store.load("customers").await.unwrap();
        assert_eq!(loaded, vec![record(json!({"_id": "3"}))]);
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_keeps_order() {
        let store = memory_store();
        let first = store
            .append("customers", record(json!({"name": "Alice"})))
            .await
            .unwrap();
        let second = store
            .append("customers", record(json!({"name": "Bob"})))
            .await
            .unwrap();

        assert_eq!(record_id(&first), Some("id_1"));
        assert_eq!(record_id(&second), Some("id_2"));

        let names: Vec<_> = store
            .load("customers")
            .await
            .unwrap()
            .iter()
            .map(|r| r["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("Alice"), json!("Bob")]);
    }

    #[tokio::test]
    async fn test_append_skips_taken_ids() {
        let store = CollectionStore::new(
            Arc::new(MemoryBackend::new()),
            Arc::new(ScriptedIds::new(&["taken", "taken", "free"])),
        );
        store
            .save("sales", &[record(json!({"_id": "taken"}))])
            .await
            .unwrap();

        let stored = store.append("sales", record(json!({}))).await.unwrap();
        assert_eq!(record_id(&stored), Some("free"));
    }

    #[tokio::test]
    async fn test_append_gives_up_when_ids_keep_colliding() {
        let store = CollectionStore::new(
            Arc::new(MemoryBackend::new()),
            Arc::new(ScriptedIds::new(&["taken"])),
        );
        store
            .save("sales", &[record(json!({"_id": "taken"}))])
            .await
            .unwrap();

        let err = store.append("sales", record(json!({}))).await.unwrap_err();
        assert!(matches!(err, StoreError::IdExhausted { .. }));
        assert_eq!(store.load("sales").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_keeps_caller_id_and_rejects_duplicates() {
        let store = memory_store();
        let stored = store
            .append("products", record(json!({"_id": "p1", "name": "Bread"})))
            .await
            .unwrap();
        assert_eq!(record_id(&stored), Some("p1"));

        let err = store
            .append("products", record(json!({"_id": "p1", "name": "Other"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(store.load("products").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_shallowly() {
        let store = memory_store();
        store
            .save(
                "products",
                &[record(json!({"_id": "p1", "name": "Bread", "price": 10, "legacy": "x"}))],
            )
            .await
            .unwrap();

        let updated = store
            .update_by_id("products", "p1", record(json!({"price": 12, "_id": "hijack"})))
            .await
            .unwrap();

        assert_eq!(
            Value::Object(updated),
            json!({"_id": "p1", "name": "Bread", "price": 12, "legacy": "x"})
        );
        assert_eq!(
            Value::Object(store.load("products").await.unwrap().remove(0)),
            json!({"_id": "p1", "name": "Bread", "price": 12, "legacy": "x"})
        );
    }

    #[tokio::test]
    async fn test_update_missing_record_changes_nothing() {
        let store = memory_store();
        let original = vec![record(json!({"_id": "p1", "name": "Bread"}))];
        store.save("products", &original).await.unwrap();

        let err = store
            .update_by_id("products", "p2", record(json!({"name": "Milk"})))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(!err.is_storage_failure());
        assert_eq!(store.load("products").await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = memory_store();
        store
            .save(
                "products",
                &[record(json!({"_id": "p1"})), record(json!({"_id": "p2"}))],
            )
            .await
            .unwrap();

        assert!(store.delete_by_id("products", "p1").await.unwrap());
        let after_first = store.load("products").await.unwrap();

        assert!(!store.delete_by_id("products", "p1").await.unwrap());
        let after_second = store.load("products").await.unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second, vec![record(json!({"_id": "p2"}))]);
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let store = memory_store();
        let product = Product {
            id: String::new(),
            name: "Bread".into(),
            description: String::new(),
            category: "Bakery".into(),
            price: 10.0,
            quantity: 5,
        };

        let stored = store.append_as(&product).await.unwrap();
        assert_eq!(stored.id, "id_1");

        let patch = ProductPatch {
            quantity: Some(7),
            ..Default::default()
        };
        let updated: Product = store.update_as(&stored.id, &patch).await.unwrap();
        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.category, "Bakery");

        let all: Vec<Product> = store.load_as().await.unwrap();
        assert_eq!(all, vec![updated]);

        assert!(store.delete_as::<Product>("id_1").await.unwrap());
        assert!(store.load_as::<Product>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_not_matching_type_is_malformed() {
        let store = memory_store();
        store
            .save("products", &[record(json!({"_id": "p1", "name": "Bread"}))])
            .await
            .unwrap();

        let err = store.load_as::<Product>().await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_typed_update_not_matching_type_writes_nothing() {
        let store = memory_store();
        let original = vec![record(
            json!({"_id": "p1", "name": "Bread", "price": 10, "quantity": 5}),
        )];
        store.save("products", &original).await.unwrap();

        let err = store
            .update_as::<Product, _>("p1", &json!({"price": "free"}))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(store.load("products").await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_reads_records_written_by_web_form() {
        let store = memory_store();
        store
            .save(
                "products",
                &[record(json!({
                    "_id": "1700000000000",
                    "name": "Bread",
                    "description": "Rye",
                    "category": "Bakery",
                    "price": "10",
                    "quantity": "5"
                }))],
            )
            .await
            .unwrap();

        let products: Vec<Product> = store.load_as().await.unwrap();
        assert_eq!(products[0].price, 10.0);
        assert_eq!(products[0].quantity, 5);

        let updated: Product = store
            .update_as("1700000000000", &json!({"quantity": "4"}))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.price, 10.0);
    }
}
