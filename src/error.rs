//! Error types for the onedrivefs library.

use thiserror::Error;

use crate::api::ApiError;

/// Main error type for filesystem operations.
///
/// Remote failures are never surfaced raw: each one is mapped onto the
/// variant that describes what went wrong for the caller, with the
/// [`ApiError`] kept as the source.
#[derive(Error, Debug)]
pub enum FsError {
    /// Path does not resolve to any remote item.
    #[error("resource not found: {path}")]
    ResourceNotFound {
        path: String,
        #[source]
        source: Option<ApiError>,
    },

    /// Item exists but is a folder where a file was required.
    #[error("path is not a file: {path}")]
    FileExpected { path: String },

    /// Item exists but is a file where a folder was required.
    #[error("path is not a directory: {path}")]
    DirectoryExpected { path: String },

    /// Exclusive create requested against an existing path.
    #[error("file exists: {path}")]
    FileExists { path: String },

    /// Directory creation against an existing path.
    #[error("directory exists: {path}")]
    DirectoryExists {
        path: String,
        #[source]
        source: Option<ApiError>,
    },

    /// Mode not supported for writing (append, update, ...).
    #[error("resource is read only in this mode: {path}")]
    ResourceReadOnly { path: String },

    /// Caller tried to change an immutable field through `setinfo`.
    ///
    /// This is a contract violation by the caller, not a remote condition.
    #[error("cannot change {field} of {path}")]
    UnsupportedMutation { path: String, field: String },

    /// Operation not supported by the stream it was called on.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Root directory cannot be removed.
    #[error("cannot remove the root directory")]
    RemoveRoot,

    /// Path contains a character the remote service rejects.
    #[error("path contains invalid characters: {path}")]
    InvalidCharsInPath { path: String },

    /// Malformed `openbin` mode string.
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// Any other remote failure (auth, transport, server error).
    #[error("operation failed on {path}: {source}")]
    OperationFailed {
        path: String,
        #[source]
        source: ApiError,
    },

    /// Local staging file error.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl FsError {
    /// Map a failed remote call on `path` onto the filesystem vocabulary.
    ///
    /// Not-found responses become [`FsError::ResourceNotFound`] and local
    /// file failures [`FsError::Io`]; everything else is an
    /// [`FsError::OperationFailed`].
    pub(crate) fn from_api(path: &str, err: ApiError) -> Self {
        if let ApiError::Io(source) = err {
            return FsError::Io {
                path: path.to_string(),
                source,
            };
        }
        if err.is_not_found() {
            FsError::ResourceNotFound {
                path: path.to_string(),
                source: Some(err),
            }
        } else {
            FsError::OperationFailed {
                path: path.to_string(),
                source: err,
            }
        }
    }

    pub(crate) fn not_found(path: &str) -> Self {
        FsError::ResourceNotFound {
            path: path.to_string(),
            source: None,
        }
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::ResourceNotFound { .. })
    }
}

/// Result type alias for onedrivefs operations.
pub type Result<T> = std::result::Result<T, FsError>;
