use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoredDocument};

/// Documents kept as JSONB rows in a single `documents` table, keyed by collection.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn append(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let id = Uuid::now_v7();

        sqlx::query("INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(&document)
            .execute(&self.pool)
            .await?;

        Ok(id.to_string())
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query_as::<_, (Uuid, Value)>(
            "SELECT id, data FROM documents WHERE collection = $1",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, data)| StoredDocument {
                id: id.to_string(),
                data,
            })
            .collect())
    }
}
