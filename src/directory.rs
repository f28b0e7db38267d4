use std::time::Duration;

use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use serde_json::Value;
use sqlx::MySqlPool;

use crate::error::StoreError;
use crate::model::employee::DirectoryEntry;
use crate::store::{self, DocumentStore, USERS_COLLECTION};

/// Employee directory lookups with a short-lived cache in front of the
/// `users` collection. Only found entries are cached, so a missing
/// employee is re-checked on every write.
pub struct EmployeeDirectory {
    cache: Cache<String, DirectoryEntry>,
}

impl Default for EmployeeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeDirectory {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(50_000)
                .time_to_live(Duration::from_secs(300)) // 5 min TTL
                .build(),
        }
    }

    pub async fn lookup<S: DocumentStore>(
        &self,
        store: &S,
        employee_id: &str,
    ) -> Result<Option<DirectoryEntry>, StoreError> {
        if let Some(entry) = self.cache.get(employee_id).await {
            return Ok(Some(entry));
        }

        let entry: Option<DirectoryEntry> =
            store::get_typed(store, USERS_COLLECTION, employee_id).await?;

        if let Some(ref found) = entry {
            self.cache
                .insert(employee_id.to_string(), found.clone())
                .await;
        }

        Ok(entry)
    }

    async fn batch_insert(&self, entries: &[(String, DirectoryEntry)]) {
        let futures: Vec<_> = entries
            .iter()
            .map(|(id, entry)| self.cache.insert(id.clone(), entry.clone()))
            .collect();

        futures::future::join_all(futures).await;
    }
}

/// Preloads directory entries into the cache (batched) so the first
/// attendance write does not pay a lookup round-trip.
pub async fn warmup_directory_cache(
    pool: &MySqlPool,
    directory: &EmployeeDirectory,
    batch_size: usize,
) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String, Value)>(
        r#"
        SELECT doc_key, body
        FROM documents
        WHERE collection_key = ?
        "#,
    )
    .bind(USERS_COLLECTION)
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (employee_id, body) = row?;
        // Skip entries that do not decode instead of failing the warmup.
        if let Ok(entry) = serde_json::from_value::<DirectoryEntry>(body) {
            batch.push((employee_id, entry));
            total_count += 1;
        }

        if batch.len() >= batch_size {
            directory.batch_insert(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        directory.batch_insert(&batch).await;
    }

    log::info!("Directory cache warmup complete: {} entries", total_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    #[actix_web::test]
    async fn lookup_resolves_manager_assignment() {
        let store = MemoryStore::new();
        store
            .set(
                USERS_COLLECTION,
                "emp-1",
                &json!({"name": "John Doe", "assignedManagerId": "mgr-1"}),
            )
            .await
            .unwrap();

        let directory = EmployeeDirectory::new();
        let entry = directory.lookup(&store, "emp-1").await.unwrap().unwrap();
        assert_eq!(entry.name, "John Doe");
        assert_eq!(entry.assigned_manager_id.as_deref(), Some("mgr-1"));
    }

    #[actix_web::test]
    async fn missing_entry_is_none_and_not_cached() {
        let store = MemoryStore::new();
        let directory = EmployeeDirectory::new();
        assert!(directory.lookup(&store, "ghost").await.unwrap().is_none());

        // The entry appearing later must be picked up.
        store
            .set(USERS_COLLECTION, "ghost", &json!({"name": "Late Arrival"}))
            .await
            .unwrap();
        assert!(directory.lookup(&store, "ghost").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn found_entries_are_served_from_cache() {
        let store = MemoryStore::new();
        store
            .set(USERS_COLLECTION, "emp-1", &json!({"name": "John Doe"}))
            .await
            .unwrap();

        let directory = EmployeeDirectory::new();
        directory.lookup(&store, "emp-1").await.unwrap().unwrap();

        // Removing the backing doc leaves the cached entry visible.
        store.set(USERS_COLLECTION, "emp-1", &json!(null)).await.unwrap();
        let entry = directory.lookup(&store, "emp-1").await.unwrap();
        assert!(entry.is_some());
    }
}
