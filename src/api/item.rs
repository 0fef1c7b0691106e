//! Remote item records as returned by the item API.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stable remote identifier of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an item is a leaf or a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Folder,
}

/// Creation and modification times as the remote system stores them.
///
/// Both are naive datetimes that are implicitly UTC. On the wire they are
/// RFC 3339 strings; the offset is dropped on read and `Z` is written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemInfo {
    #[serde(default, with = "naive_utc", skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "naive_utc", skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<NaiveDateTime>,
}

impl FileSystemInfo {
    pub fn is_empty(&self) -> bool {
        self.created_date_time.is_none() && self.last_modified_date_time.is_none()
    }
}

/// Folder facet; its presence marks an item as a folder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    #[serde(default)]
    pub child_count: u64,
}

/// File facet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Camera metadata, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Photo {
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub exposure_denominator: Option<f64>,
    pub exposure_numerator: Option<f64>,
    pub focal_length: Option<f64>,
    pub f_number: Option<f64>,
    pub taken_date_time: Option<String>,
    pub iso: Option<u32>,
}

/// Geolocation, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub altitude: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Free-form tags, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A file or folder in the remote drive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItem {
    /// Stable remote identifier
    pub id: ItemId,
    /// Leaf name
    pub name: String,
    /// Size in bytes (aggregate size for folders)
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub folder: Option<FolderFacet>,
    #[serde(default)]
    pub file: Option<FileFacet>,
    #[serde(default)]
    pub file_system_info: FileSystemInfo,
    #[serde(default)]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: Option<Tags>,
}

impl RemoteItem {
    /// Folder presence decides the kind; anything without a folder facet is a file.
    pub fn kind(&self) -> ItemKind {
        if self.folder.is_some() {
            ItemKind::Folder
        } else {
            ItemKind::File
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == ItemKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind() == ItemKind::File
    }
}

/// Opaque token pointing at the next page of a child listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(cursor: impl Into<String>) -> Self {
        Self(cursor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a folder's children.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildrenPage {
    #[serde(rename = "value", default)]
    pub items: Vec<RemoteItem>,
    /// Present when more children follow this page.
    #[serde(rename = "@odata.nextLink", default)]
    pub next: Option<PageCursor>,
}

/// Metadata update for a single item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    /// Target of the update; carried in the URL, not the body.
    #[serde(skip)]
    pub id: ItemId,
    pub file_system_info: FileSystemInfo,
}

impl ItemPatch {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            file_system_info: FileSystemInfo::default(),
        }
    }

    /// Check if the patch stages no change at all.
    pub fn is_empty(&self) -> bool {
        self.file_system_info.is_empty()
    }
}

mod naive_utc {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer
                .serialize_str(&dt.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(value.map(|dt| dt.naive_utc()))
    }
}
