use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentStore, ObjectStore, StoreError, StoredDocument, join_url};

/// Process-local document store. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, Vec<StoredDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn append(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let id = Uuid::now_v7().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                data: document,
            });
        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.clone())
            .unwrap_or_default())
    }
}

/// Process-local object store handing out URLs under `public_url`.
pub struct MemoryObjectStore {
    public_url: String,
    objects: DashMap<String, (Bytes, Option<String>)>,
}

impl MemoryObjectStore {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
            objects: DashMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.objects.get(path).map(|entry| entry.0.clone())
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.objects.get(path).and_then(|entry| entry.1.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, StoreError> {
        self.objects.insert(
            path.to_string(),
            (bytes, content_type.map(|s| s.to_string())),
        );
        Ok(join_url(&self.public_url, path))
    }
}
