use async_trait::async_trait;
use bytes::Bytes;

use super::{ObjectStore, StoreError, join_url};

/// Object storage reached over plain HTTP `PUT`, e.g. an S3-compatible bucket
/// with a write token in front of it.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    public_url: String,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(
        endpoint: impl Into<String>,
        public_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            public_url: public_url.into(),
            token,
        })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, StoreError> {
        let url = join_url(&self.endpoint, path);

        let mut req = self
            .client
            .put(&url)
            .header("Content-Type", content_type.unwrap_or("application/octet-stream"));

        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.body(bytes).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("Object upload to {url} returned {status}");
            return Err(StoreError::Rejected(status.as_u16()));
        }

        Ok(join_url(&self.public_url, path))
    }
}
