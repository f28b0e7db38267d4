use serde_json::Value;
use sqlx::MySqlPool;

use crate::error::StoreError;
use crate::store::DocumentStore;

/// MySQL-backed document store.
///
/// Backing table:
/// ```sql
/// CREATE TABLE documents (
///     collection_key VARCHAR(128) NOT NULL,
///     doc_key        VARCHAR(128) NOT NULL,
///     body           JSON         NOT NULL,
///     PRIMARY KEY (collection_key, doc_key)
/// );
/// ```
#[derive(Clone)]
pub struct MySqlDocumentStore {
    pool: MySqlPool,
}

impl MySqlDocumentStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = MySqlPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl DocumentStore for MySqlDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT body
            FROM documents
            WHERE collection_key = ? AND doc_key = ?
            "#,
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(body)
    }

    async fn set(&self, collection: &str, key: &str, document: &Value) -> Result<(), StoreError> {
        // Upsert keeps set() a full overwrite, matching the store contract.
        sqlx::query(
            r#"
            INSERT INTO documents (collection_key, doc_key, body)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE body = VALUES(body)
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(document)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
