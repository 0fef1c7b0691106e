//! Adapter configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{FsError, Result};

/// Default OneDrive API root.
pub const DEFAULT_API_URL: &str = "https://api.onedrive.com/v1.0/";

/// Settings for the HTTP client and the stream bridge.
///
/// Every field has a default, so an empty TOML document is valid.
///
/// ```toml
/// api_url = "https://api.onedrive.com/v1.0/"
/// timeout_secs = 20
/// proxy = "http://127.0.0.1:8080"
/// page_size = 200
/// temp_prefix = "onedrivefs-"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the item API; must end with `/`.
    pub api_url: String,
    /// Per-request timeout enforced by the transport.
    pub timeout_secs: u64,
    /// Optional HTTP/SOCKS proxy.
    pub proxy: Option<String>,
    /// Requested children per page (`$top`); the server may return fewer.
    pub page_size: Option<u32>,
    /// Prefix for local staging files.
    pub temp_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 20,
            proxy: None,
            page_size: None,
            temp_prefix: "onedrivefs-".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FsError::io(path.display().to_string(), e))?;
        Self::from_toml_str(&text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
