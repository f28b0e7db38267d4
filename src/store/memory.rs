use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::StoreError;
use crate::store::DocumentStore;

/// In-memory document store for tests and local runs.
#[derive(Default, Clone)]
pub struct MemoryStore {
    docs: Arc<Mutex<HashMap<(String, String), Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections.
    pub fn document_count(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let docs = self.docs.lock().unwrap();
        Ok(docs.get(&(collection.to_string(), key.to_string())).cloned())
    }

    async fn set(&self, collection: &str, key: &str, document: &Value) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().unwrap();
        docs.insert(
            (collection.to_string(), key.to_string()),
            document.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[actix_web::test]
    async fn set_overwrites_the_whole_document() {
        let store = MemoryStore::new();
        store
            .set("users", "emp-1", &json!({"name": "John", "extra": true}))
            .await
            .unwrap();
        store
            .set("users", "emp-1", &json!({"name": "Jane"}))
            .await
            .unwrap();

        let doc = store.get("users", "emp-1").await.unwrap().unwrap();
        assert_eq!(doc, json!({"name": "Jane"}));
        assert_eq!(store.document_count(), 1);
    }

    #[actix_web::test]
    async fn get_of_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("users", "ghost").await.unwrap().is_none());
    }
}
