use async_trait::async_trait;

use crate::error::Result;
use crate::path::{join, normalize};

use super::info::{Info, RawInfo};
use super::scan::InfoStream;
use super::stream::BinaryFile;
use super::{Filesystem, Meta};

/// A view of a parent filesystem rooted at a sub-directory.
///
/// Paths passed to a `SubFs` are relative to its base; `..` stops at the
/// view's own root and never reaches the rest of the parent.
#[derive(Clone)]
pub struct SubFs<'a> {
    fs: &'a dyn Filesystem,
    base: String,
}

impl<'a> SubFs<'a> {
    pub fn new(fs: &'a dyn Filesystem, base: impl Into<String>) -> Self {
        Self {
            fs,
            base: base.into(),
        }
    }

    /// Absolute path of this view's root in the parent filesystem.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Translate a path in this view to a path in the parent.
    pub fn delegate_path(&self, path: &str) -> String {
        join(&self.base, &normalize(path))
    }
}

impl std::fmt::Debug for SubFs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubFs").field("base", &self.base).finish()
    }
}

#[async_trait]
impl<'a> Filesystem for SubFs<'a> {
    async fn getinfo(&self, path: &str) -> Result<Info> {
        self.fs.getinfo(&self.delegate_path(path)).await
    }

    async fn setinfo(&self, path: &str, info: &RawInfo) -> Result<()> {
        self.fs.setinfo(&self.delegate_path(path), info).await
    }

    async fn scandir(&self, path: &str) -> Result<InfoStream> {
        self.fs.scandir(&self.delegate_path(path)).await
    }

    async fn makedir<'s>(&'s self, path: &str, recreate: bool) -> Result<SubFs<'s>> {
        self.fs.makedir(&self.delegate_path(path), recreate).await
    }

    async fn openbin(&self, path: &str, mode: &str) -> Result<BinaryFile> {
        self.fs.openbin(&self.delegate_path(path), mode).await
    }

    async fn remove(&self, path: &str) -> Result<()> {
        self.fs.remove(&self.delegate_path(path)).await
    }

    async fn removedir(&self, path: &str) -> Result<()> {
        self.fs.removedir(&self.delegate_path(path)).await
    }

    fn getmeta(&self) -> Meta {
        self.fs.getmeta()
    }
}
