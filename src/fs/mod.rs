//! Filesystem interface over a remote item store.
//!
//! [`Filesystem`] is the path-based contract callers program against;
//! [`OneDriveFs`] implements it on top of an [`ItemApi`](crate::api::ItemApi).

pub mod info;
pub mod mode;
pub mod onedrive;
pub(crate) mod resolve;
pub mod scan;
pub mod stream;
pub mod subfs;

use std::io::{Read, Write};

use async_trait::async_trait;
use futures::TryStreamExt;
use serde::Serialize;

use crate::error::{FsError, Result};

pub use info::{Basic, Details, Info, RawInfo, ResourceType, datetime_to_epoch, epoch_to_datetime};
pub use mode::Mode;
pub use onedrive::OneDriveFs;
pub use scan::InfoStream;
pub use stream::{BinaryFile, ReadStream, WriteStream};
pub use subfs::SubFs;

/// Static capabilities of a filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub case_insensitive: bool,
    pub invalid_path_chars: &'static str,
    pub max_path_length: Option<usize>,
    pub max_sys_path_length: Option<usize>,
    pub network: bool,
    pub read_only: bool,
    pub supports_rename: bool,
}

/// Path-based filesystem operations.
///
/// Paths are `/`-separated; relative paths are taken from the root.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Describe the resource at `path`.
    async fn getinfo(&self, path: &str) -> Result<Info>;

    /// Apply the settable fields of `info` to the resource at `path`.
    async fn setinfo(&self, path: &str, info: &RawInfo) -> Result<()>;

    /// Lazily enumerate the directory at `path`.
    ///
    /// Resolution failures are returned here; page fetch failures surface
    /// as items of the stream.
    async fn scandir(&self, path: &str) -> Result<InfoStream>;

    /// Create the directory at `path` and return a view rooted at it.
    async fn makedir<'a>(&'a self, path: &str, recreate: bool) -> Result<SubFs<'a>>;

    /// Open a binary file. See [`Mode`] for the accepted mode strings.
    async fn openbin(&self, path: &str, mode: &str) -> Result<BinaryFile>;

    /// Remove a file.
    async fn remove(&self, path: &str) -> Result<()>;

    /// Remove a directory.
    async fn removedir(&self, path: &str) -> Result<()>;

    fn getmeta(&self) -> Meta;

    /// Names of the entries of the directory at `path`, in `scandir` order.
    async fn listdir(&self, path: &str) -> Result<Vec<String>> {
        self.scandir(path)
            .await?
            .map_ok(|info| info.basic.name)
            .try_collect()
            .await
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        match self.getinfo(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn isdir(&self, path: &str) -> Result<bool> {
        match self.getinfo(path).await {
            Ok(info) => Ok(info.is_dir()),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn isfile(&self, path: &str) -> Result<bool> {
        match self.getinfo(path).await {
            Ok(info) => Ok(info.is_file()),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Read the whole file at `path`.
    async fn readbytes(&self, path: &str) -> Result<Vec<u8>> {
        let mut file = self.openbin(path, "r").await?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| FsError::io(path, e))?;
        Ok(data)
    }

    /// Create or replace the file at `path` with `data`.
    async fn writebytes(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut file = self.openbin(path, "w").await?;
        file.write_all(data).map_err(|e| FsError::io(path, e))?;
        file.close().await
    }
}
