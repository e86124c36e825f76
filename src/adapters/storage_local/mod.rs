//! Local object storage adapter
//!
//! Stores objects as files under a root directory and hands out `file://`
//! URLs for them.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::path::{join_key, sanitize_file_name};

const URL_SCHEME: &str = "file://";

/// Object key `<prefix>/<millis>-<sanitized name>` for a user upload
pub fn blob_path(prefix: &str, file_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    join_key(
        prefix,
        &format!("{}-{}", millis, sanitize_file_name(file_name)),
    )
}

/// Directory-backed object store
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create the store, creating `root` if needed
    pub fn new(root: impl AsRef<Path>) -> Result<Self, DomainError> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| {
            DomainError::StorageFail(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;
        let root = root.canonicalize().map_err(|e| {
            DomainError::StorageFail(format!("Failed to resolve storage root: {}", e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object key to a path, refusing keys that escape the root
    fn key_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(key.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || key.trim().is_empty() {
            return Err(DomainError::StorageFail(format!("Invalid object key: {}", key)));
        }
        Ok(self.root.join(relative))
    }

    fn url_for(&self, path: &Path) -> String {
        format!("{}{}", URL_SCHEME, path.display())
    }

    fn path_for_url(&self, url: &str) -> Result<PathBuf, DomainError> {
        let raw = url
            .strip_prefix(URL_SCHEME)
            .ok_or_else(|| DomainError::StorageFail(format!("Unsupported URL: {}", url)))?;
        let key = Path::new(raw)
            .strip_prefix(&self.root)
            .map_err(|_| DomainError::StorageFail(format!("URL outside storage root: {}", url)))?;
        self.key_path(&key.to_string_lossy())
    }
}

#[async_trait]
impl ObjectStoragePort for LocalObjectStore {
    async fn upload(&self, bytes: Vec<u8>, path_hint: &str) -> Result<String, DomainError> {
        let path = self.key_path(path_hint)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::StorageFail(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let size = bytes.len();
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            DomainError::StorageFail(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(key = path_hint, size, "object uploaded");
        Ok(self.url_for(&path))
    }

    async fn delete(&self, url: &str) -> bool {
        let path = match self.path_for_url(url) {
            Ok(path) => path,
            Err(e) => {
                warn!("Error deleting blob: {}", e);
                return false;
            }
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(url, "object deleted");
                true
            }
            Err(e) => {
                warn!(url, "Error deleting blob: {}", e);
                false
            }
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        let base = if prefix.trim_matches('/').is_empty() {
            self.root.clone()
        } else {
            self.key_path(prefix)?
        };
        if !base.exists() {
            return Ok(Vec::new());
        }

        let scheme_root = self.root.clone();
        let mut urls = tokio::task::spawn_blocking(move || {
            WalkDir::new(&base)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| path.starts_with(&scheme_root))
                .map(|path| format!("{}{}", URL_SCHEME, path.display()))
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| DomainError::StorageFail(format!("Listing task failed: {}", e)))?;

        urls.sort();
        Ok(urls)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.path_for_url(url)?;
        tokio::fs::read(&path).await.map_err(|e| {
            DomainError::StorageFail(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}
