//! Remote item API: the contract the filesystem adapter consumes, and a
//! OneDrive REST implementation of it.

pub mod client;
pub mod error;
pub mod item;
#[cfg(test)]
pub(crate) mod memory;

use std::path::Path;

use async_trait::async_trait;

pub use client::OneDriveClient;
pub use error::{ApiError, ApiErrorCode};
pub use item::{
    ChildrenPage, FileFacet, FileSystemInfo, FolderFacet, ItemId, ItemKind, ItemPatch, Location,
    PageCursor, Photo, RemoteItem, Tags,
};

/// Result type alias for remote API calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Operations offered by a remote item store.
///
/// Paths are absolute, `/`-separated and already normalized. Every call
/// completes (or fails) before returning; implementations do not retry.
#[async_trait]
pub trait ItemApi: Send + Sync {
    /// Look up a single item by absolute path.
    async fn item_by_path(&self, path: &str) -> ApiResult<RemoteItem>;

    /// Fetch one page of a folder's children.
    ///
    /// `cursor` is `None` for the first page and the previous page's
    /// [`ChildrenPage::next`] afterwards.
    async fn children(
        &self,
        folder: &ItemId,
        cursor: Option<&PageCursor>,
    ) -> ApiResult<ChildrenPage>;

    /// Create a folder named `name` under `parent`.
    async fn create_folder(&self, parent: &ItemId, name: &str) -> ApiResult<RemoteItem>;

    /// Apply a metadata patch to the item it names.
    async fn update(&self, patch: &ItemPatch) -> ApiResult<RemoteItem>;

    /// Delete an item (and, for folders, whatever the service deletes with it).
    async fn delete(&self, item: &ItemId) -> ApiResult<()>;

    /// Download the full content of a file into `local`.
    async fn download_to(&self, item: &ItemId, local: &Path) -> ApiResult<()>;

    /// Upload the full content of `local` to `path`, creating or replacing it.
    async fn upload_from(&self, path: &str, local: &Path) -> ApiResult<RemoteItem>;
}
