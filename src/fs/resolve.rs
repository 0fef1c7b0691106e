//! Path-to-item resolution.

use std::sync::Arc;

use crate::api::{ItemApi, RemoteItem};
use crate::error::{FsError, Result};
use crate::path::normalize;

/// Normalize `path` and reject any character in `invalid`.
pub(crate) fn validate_path(path: &str, invalid: &str) -> Result<String> {
    if path.contains(|c: char| invalid.contains(c)) {
        return Err(FsError::InvalidCharsInPath {
            path: path.to_string(),
        });
    }
    Ok(normalize(path))
}

/// Maps normalized paths to remote items with one lookup per call.
#[derive(Clone)]
pub(crate) struct Resolver {
    client: Arc<dyn ItemApi>,
}

impl Resolver {
    pub(crate) fn new(client: Arc<dyn ItemApi>) -> Self {
        Self { client }
    }

    /// Look up the item at `path`; absence is an error.
    pub(crate) async fn resolve(&self, path: &str) -> Result<RemoteItem> {
        self.client
            .item_by_path(path)
            .await
            .map_err(|e| FsError::from_api(path, e))
    }

    /// Look up the item at `path`; absence is `None`.
    pub(crate) async fn lookup(&self, path: &str) -> Result<Option<RemoteItem>> {
        match self.resolve(path).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Resolve `path`, requiring a file.
    pub(crate) async fn resolve_file(&self, path: &str) -> Result<RemoteItem> {
        let item = self.resolve(path).await?;
        if !item.is_file() {
            return Err(FsError::FileExpected {
                path: path.to_string(),
            });
        }
        Ok(item)
    }

    /// Resolve `path`, requiring a folder.
    pub(crate) async fn resolve_dir(&self, path: &str) -> Result<RemoteItem> {
        let item = self.resolve(path).await?;
        if !item.is_folder() {
            return Err(FsError::DirectoryExpected {
                path: path.to_string(),
            });
        }
        Ok(item)
    }
}
