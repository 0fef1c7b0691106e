//! # onedrivefs
//!
//! Path-based filesystem interface over OneDrive cloud storage.
//!
//! ## Features
//!
//! - **Metadata**: `getinfo` reports name, kind, size and timestamps, plus
//!   `photo`, `location` and `tags` namespaces when the item carries them.
//!   - `setinfo` updates creation and modification times; renames, size and
//!     kind changes are refused.
//! - **Directories**: lazy, paginated `scandir`, `listdir`, `makedir`
//!   (returning a [`SubFs`] view) and `removedir`.
//! - **Files**: `openbin` for reading and writing whole files, `remove`.
//!   - Reads download the whole file before returning.
//!   - Writes are staged locally and uploaded when the file is closed.
//!
//! Nothing is cached: every call resolves its path against the service.
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures::TryStreamExt;
//! use onedrivefs::{Config, Filesystem, OneDriveFs, StaticToken};
//!
//! # async fn example() -> onedrivefs::Result<()> {
//! let token = StaticToken::from_env("ONEDRIVE_TOKEN").expect("token");
//! let fs = OneDriveFs::new(Config::default(), Arc::new(token))?;
//!
//! // List a folder
//! let mut entries = fs.scandir("/Documents").await?;
//! while let Some(info) = entries.try_next().await? {
//!     println!("{} ({} bytes)", info.name(), info.size());
//! }
//!
//! // Write, then read back
//! fs.writebytes("/Documents/notes.txt", b"hello").await?;
//! let data = fs.readbytes("/Documents/notes.txt").await?;
//! assert_eq!(data, b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Streams
//!
//! Write streams upload on [`close`](fs::BinaryFile::close); an upload
//! failure is returned from there.
//!
//! ```no_run
//! use std::io::Write;
//! use onedrivefs::{Filesystem, OneDriveFs};
//!
//! # async fn example(fs: &OneDriveFs) -> onedrivefs::Result<()> {
//! let mut file = fs.openbin("/Documents/report.csv", "wb").await?;
//! file.write_all(b"a,b\n1,2\n").expect("write");
//! file.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;
pub mod path;

// Re-export commonly used types
pub use api::{ApiError, ItemApi, OneDriveClient};
pub use auth::{CredentialProvider, StaticToken};
pub use config::Config;
pub use error::{FsError, Result};
pub use fs::{BinaryFile, Filesystem, Info, InfoStream, Meta, Mode, OneDriveFs, RawInfo, SubFs};
