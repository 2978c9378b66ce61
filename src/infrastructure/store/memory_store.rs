//! In-process document store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::ports::{DocumentStorePort, Fields, StoredDocument};

type Collection = BTreeMap<String, Fields>;

/// Document store kept in memory; used by tests and `--backend memory`.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStorePort for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| StoredDocument::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        doc.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let store = MemoryStore::new();

        let id = store
            .create("members", fields(json!({ "name": "Ana", "mobile": "1" })))
            .await
            .unwrap();
        store
            .update("members", &id, fields(json!({ "mobile": "2" })))
            .await
            .unwrap();

        let docs = store.list("members").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].fields["name"], "Ana");
        assert_eq!(docs[0].fields["mobile"], "2");

        store.delete("members", &id).await.unwrap();
        assert!(store.list("members").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_document() {
        let store = MemoryStore::new();

        let err = store.delete("members", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(store.list("transactions").await.unwrap().is_empty());
    }
}
