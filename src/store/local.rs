use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use super::{ObjectStore, StoreError, join_url};

/// Writes objects beneath a root directory. The app serves that directory at
/// `/uploads`, so the public URL drops the leading `uploads/` segment.
pub struct LocalObjectStore {
    root: PathBuf,
    public_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_url: join_url(base_url, "uploads"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<(PathBuf, String), StoreError> {
        let relative = path.strip_prefix("uploads/").unwrap_or(path);
        let relative_path = Path::new(relative);

        let escapes = relative_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if relative.is_empty() || escapes {
            return Err(StoreError::Unavailable(format!("Invalid object path: {path}")));
        }

        Ok((self.root.join(relative_path), relative.to_string()))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: Bytes,
        _content_type: Option<&str>,
    ) -> Result<String, StoreError> {
        let (target, relative) = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!("Stored {} bytes at {}", bytes.len(), target.display());

        Ok(join_url(&self.public_url, &relative))
    }
}
