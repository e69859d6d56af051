pub mod http;
pub mod local;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

/// A stored document together with the identifier the store assigned to it.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
}

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Io(std::io::Error),
    Http(reqwest::Error),
    Rejected(u16),
    Serialization(serde_json::Error),
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {err}"),
            StoreError::Io(err) => write!(f, "I/O error: {err}"),
            StoreError::Http(err) => write!(f, "HTTP error: {err}"),
            StoreError::Rejected(status) => write!(f, "Storage rejected request with status {status}"),
            StoreError::Serialization(err) => write!(f, "Serialization error: {err}"),
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Http(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

/// Schemaless append/list access to named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a new document and return its identifier.
    async fn append(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    /// Every document in the collection, in whatever order the backend yields.
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;
}

/// Put-by-path object storage that hands back a publicly resolvable URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` at `path`, replacing whatever was there, and return its public URL.
    async fn put(
        &self,
        path: &str,
        bytes: bytes::Bytes,
        content_type: Option<&str>,
    ) -> Result<String, StoreError>;
}

/// Characters kept as-is inside a URL path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode each segment of an object path, keeping the `/` separators.
pub fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a base URL and an object path with exactly one slash between them.
/// The path is percent-encoded so names containing `#`, `?` or spaces stay one resource.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), encode_path(path))
}
