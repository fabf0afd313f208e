//! In-memory implementation of ModelStore for testing and development

use crate::schema::Schema;
use crate::storage::ModelStore;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory model store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// items are keyed by the canonical form of their identifier field.
#[derive(Clone)]
pub struct InMemoryModelStore {
    id_name: String,
    items: Arc<RwLock<HashMap<String, Value>>>,
}

fn key_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl InMemoryModelStore {
    /// Create a new in-memory store for one model
    pub fn new(schema: &Schema) -> Self {
        Self {
            id_name: schema.identifier().name.clone(),
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn id_key(&self, item: &Value) -> Result<String> {
        let id = item
            .get(&self.id_name)
            .filter(|id| !id.is_null())
            .ok_or_else(|| anyhow!("item has no '{}' field", self.id_name))?;
        Ok(key_of(id))
    }
}

#[async_trait]
impl ModelStore for InMemoryModelStore {
    async fn create(&self, item: Value) -> Result<Value> {
        let key = self.id_key(&item)?;
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if items.contains_key(&key) {
            bail!("item with id '{}' already exists", key);
        }
        items.insert(key, item.clone());

        Ok(item)
    }

    async fn create_many(&self, new_items: Vec<Value>) -> Result<Vec<Value>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // All keys are checked before any insert so a batch never half-applies.
        let mut keyed = Vec::with_capacity(new_items.len());
        for item in new_items {
            let id = item
                .get(&self.id_name)
                .filter(|id| !id.is_null())
                .ok_or_else(|| anyhow!("item has no '{}' field", self.id_name))?;
            let key = key_of(id);
            if items.contains_key(&key) {
                bail!("item with id '{}' already exists", key);
            }
            keyed.push((key, item));
        }

        let mut created = Vec::with_capacity(keyed.len());
        for (key, item) in keyed {
            items.insert(key, item.clone());
            created.push(item);
        }
        Ok(created)
    }

    async fn get(&self, id: &Value) -> Result<Option<Value>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.get(&key_of(id)).cloned())
    }

    async fn list(&self) -> Result<Vec<Value>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.values().cloned().collect())
    }

    async fn update(&self, id: &Value, item: Value) -> Result<Value> {
        let key = key_of(id);
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !items.contains_key(&key) {
            bail!("no item with id '{}'", key);
        }
        items.insert(key, item.clone());

        Ok(item)
    }

    async fn delete(&self, id: &Value) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.remove(&key_of(id));
        Ok(())
    }

    async fn search(&self, field: &str, value: &Value) -> Result<Vec<Value>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items
            .values()
            .filter(|item| item.get(field).is_some_and(|v| v == value))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ModelBuilder, PropertyBuilder};
    use serde_json::json;

    fn store() -> InMemoryModelStore {
        let schema = ModelBuilder::new("Thing")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::text("name"))
            .build()
            .unwrap();
        InMemoryModelStore::new(&schema)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store();
        store.create(json!({"id": 1, "name": "a"})).await.unwrap();

        let found = store.get(&json!(1)).await.unwrap().unwrap();
        assert_eq!(found["name"], "a");
    }

    #[tokio::test]
    async fn test_create_rejects_existing_id() {
        let store = store();
        store.create(json!({"id": 1, "name": "a"})).await.unwrap();

        assert!(store.create(json!({"id": 1, "name": "b"})).await.is_err());
    }

    #[tokio::test]
    async fn test_create_many_is_all_or_nothing() {
        let store = store();
        store.create(json!({"id": 2, "name": "a"})).await.unwrap();

        let result = store
            .create_many(vec![
                json!({"id": 1, "name": "b"}),
                json!({"id": 2, "name": "c"}),
            ])
            .await;

        assert!(result.is_err());
        assert!(store.get(&json!(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_item() {
        let store = store();
        store.create(json!({"id": 1, "name": "a"})).await.unwrap();
        store
            .update(&json!(1), json!({"id": 1, "name": "b"}))
            .await
            .unwrap();

        let found = store.get(&json!(1)).await.unwrap().unwrap();
        assert_eq!(found["name"], "b");
    }

    #[tokio::test]
    async fn test_update_missing_item_fails() {
        let store = store();
        assert!(
            store
                .update(&json!(9), json!({"id": 9, "name": "x"}))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_search_matches_field_value() {
        let store = store();
        store.create(json!({"id": 1, "name": "a"})).await.unwrap();
        store.create(json!({"id": 2, "name": "b"})).await.unwrap();
        store.create(json!({"id": 3, "name": "a"})).await.unwrap();

        let hits = store.search("name", &json!("a")).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_item() {
        let store = store();
        store.create(json!({"id": 1, "name": "a"})).await.unwrap();
        store.delete(&json!(1)).await.unwrap();

        assert!(store.get(&json!(1)).await.unwrap().is_none());
    }
}
