//! [`Filesystem`] implementation backed by a OneDrive item store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ItemApi, OneDriveClient};
use crate::auth::CredentialProvider;
use crate::config::Config;
use crate::error::{FsError, Result};
use crate::path::{basename, dirname, is_root};

use super::info::{Info, RawInfo, item_to_info, update_to_patch};
use super::mode::Mode;
use super::resolve::{Resolver, validate_path};
use super::scan::{self, InfoStream};
use super::stream::{self, BinaryFile, WriteStream};
use super::subfs::SubFs;
use super::{Filesystem, Meta};

const META: Meta = Meta {
    case_insensitive: false,
    invalid_path_chars: ":",
    max_path_length: None,
    max_sys_path_length: None,
    network: true,
    read_only: false,
    supports_rename: false,
};

/// OneDrive filesystem.
///
/// Holds one authenticated client for its whole lifetime and caches
/// nothing: every operation resolves its path against the service.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use onedrivefs::{Config, Filesystem, OneDriveFs, StaticToken};
///
/// # async fn example() -> onedrivefs::Result<()> {
/// let fs = OneDriveFs::new(Config::default(), Arc::new(StaticToken::new("token")))?;
/// for name in fs.listdir("/Documents").await? {
///     println!("{name}");
/// }
/// fs.writebytes("/Documents/hello.txt", b"hello").await?;
/// # Ok(())
/// # }
/// ```
pub struct OneDriveFs {
    client: Arc<dyn ItemApi>,
    resolver: Resolver,
    config: Config,
}

impl OneDriveFs {
    /// Connect to the service configured in `config`.
    pub fn new(config: Config, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = OneDriveClient::new(&config, credentials).map_err(|e| {
            FsError::OperationFailed {
                path: config.api_url.clone(),
                source: e,
            }
        })?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    /// Build a filesystem over an existing item store.
    pub fn with_client(client: Arc<dyn ItemApi>, config: Config) -> Self {
        Self {
            resolver: Resolver::new(client.clone()),
            client,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn validate(&self, path: &str) -> Result<String> {
        validate_path(path, META.invalid_path_chars)
    }
}

impl std::fmt::Debug for OneDriveFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneDriveFs")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Filesystem for OneDriveFs {
    async fn getinfo(&self, path: &str) -> Result<Info> {
        let path = self.validate(path)?;
        let item = self.resolver.resolve(&path).await?;
        Ok(item_to_info(&item))
    }

    async fn setinfo(&self, path: &str, info: &RawInfo) -> Result<()> {
        let path = self.validate(path)?;
        let existing = self.resolver.resolve(&path).await?;
        let patch = update_to_patch(&path, &existing, info)?;
        if patch.is_empty() {
            debug!(path = %path, "nothing to update");
            return Ok(());
        }

        self.client
            .update(&patch)
            .await
            .map_err(|e| FsError::from_api(&path, e))?;
        debug!(path = %path, id = %patch.id, "metadata updated");
        Ok(())
    }

    async fn scandir(&self, path: &str) -> Result<InfoStream> {
        let path = self.validate(path)?;
        let folder = self.resolver.resolve_dir(&path).await?;
        Ok(scan::children(self.client.clone(), path, folder.id))
    }

    async fn makedir<'a>(&'a self, path: &str, recreate: bool) -> Result<SubFs<'a>> {
        let path = self.validate(path)?;
        if is_root(&path) {
            if recreate {
                return Ok(SubFs::new(self, path));
            }
            return Err(FsError::DirectoryExists { path, source: None });
        }

        let parent = self.resolver.resolve_dir(dirname(&path)).await?;
        match self.client.create_folder(&parent.id, basename(&path)).await {
            Ok(created) => {
                debug!(path = %path, id = %created.id, "directory created");
                Ok(SubFs::new(self, path))
            }
            Err(e) if e.is_conflict() => {
                let reusable = recreate
                    && self
                        .resolver
                        .lookup(&path)
                        .await?
                        .is_some_and(|item| item.is_folder());
                if reusable {
                    return Ok(SubFs::new(self, path));
                }
                Err(FsError::DirectoryExists {
                    path,
                    source: Some(e),
                })
            }
            Err(e) => Err(FsError::from_api(&path, e)),
        }
    }

    async fn openbin(&self, path: &str, mode: &str) -> Result<BinaryFile> {
        let path = self.validate(path)?;
        let mode = Mode::parse(mode)?;
        mode.validate_bin()?;

        // Appending and updating would need a download-modify-upload cycle.
        if mode.appending() || mode.updating() {
            return Err(FsError::ResourceReadOnly { path });
        }

        let existing = self.resolver.lookup(&path).await?;
        if mode.exclusive() && existing.is_some() {
            return Err(FsError::FileExists { path });
        }
        if existing.as_ref().is_some_and(|item| item.is_folder()) {
            return Err(FsError::FileExpected { path });
        }

        if mode.writing() {
            if existing.is_none() {
                self.resolver.resolve_dir(dirname(&path)).await?;
            }
            let writer = WriteStream::create(self.client.clone(), &path, &self.config.temp_prefix)?;
            return Ok(BinaryFile::Writer(writer));
        }

        if mode.reading() {
            let item = existing.ok_or_else(|| FsError::not_found(&path))?;
            let reader =
                stream::download(self.client.as_ref(), &path, &item, &self.config.temp_prefix)
                    .await?;
            return Ok(BinaryFile::Reader(reader));
        }

        Err(FsError::ResourceReadOnly { path })
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let path = self.validate(path)?;
        let item = self.resolver.resolve_file(&path).await?;
        self.client
            .delete(&item.id)
            .await
            .map_err(|e| FsError::from_api(&path, e))?;
        debug!(path = %path, "file removed");
        Ok(())
    }

    async fn removedir(&self, path: &str) -> Result<()> {
        let path = self.validate(path)?;
        if is_root(&path) {
            return Err(FsError::RemoveRoot);
        }
        let item = self.resolver.resolve_dir(&path).await?;
        self.client
            .delete(&item.id)
            .await
            .map_err(|e| FsError::from_api(&path, e))?;
        debug!(path = %path, "directory removed");
        Ok(())
    }

    fn getmeta(&self) -> Meta {
        META
    }
}
