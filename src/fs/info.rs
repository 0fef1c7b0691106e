//! Info records and the translation between them and remote items.
//!
//! [`item_to_info`] builds the namespaced record callers read;
//! [`update_to_patch`] turns a namespaced update request back into an
//! [`ItemPatch`] for the remote service.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::api::{ItemPatch, Location, Photo, RemoteItem, Tags};
use crate::error::{FsError, Result};

/// Namespace -> field -> value mapping, as accepted by `setinfo`.
pub type RawInfo = BTreeMap<String, Map<String, Value>>;

/// Resource type code reported in the `details` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResourceType {
    File = 0,
    Directory = 1,
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// `basic` namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Basic {
    pub name: String,
    pub is_dir: bool,
}

/// `details` namespace. Timestamps are epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    /// Always `None`; the remote system does not track access times.
    pub accessed: Option<i64>,
    pub created: Option<i64>,
    /// Always `None`; the remote system does not track metadata changes.
    pub metadata_changed: Option<i64>,
    pub modified: Option<i64>,
    pub size: u64,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

/// Namespaced description of a file or directory.
///
/// Optional namespaces are only present when the remote item carries the
/// matching extension block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub basic: Basic,
    pub details: Details,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl Info {
    pub fn name(&self) -> &str {
        &self.basic.name
    }

    pub fn is_dir(&self) -> bool {
        self.basic.is_dir
    }

    pub fn is_file(&self) -> bool {
        !self.basic.is_dir
    }

    pub fn size(&self) -> u64 {
        self.details.size
    }

    pub fn resource_type(&self) -> ResourceType {
        self.details.resource_type
    }

    pub fn created(&self) -> Option<i64> {
        self.details.created
    }

    pub fn modified(&self) -> Option<i64> {
        self.details.modified
    }

    /// Check if a namespace is present in this record.
    pub fn has_namespace(&self, namespace: &str) -> bool {
        match namespace {
            "basic" | "details" => true,
            "photo" => self.photo.is_some(),
            "location" => self.location.is_some(),
            "tags" => self.tags.is_some(),
            _ => false,
        }
    }

    /// Render the record as a namespaced JSON object.
    pub fn raw(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Naive UTC datetime to epoch seconds.
pub fn datetime_to_epoch(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}

/// Epoch seconds to a naive UTC datetime; `None` when out of range.
pub fn epoch_to_datetime(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// Describe a remote item.
pub fn item_to_info(item: &RemoteItem) -> Info {
    let is_dir = item.is_folder();
    let fs_info = &item.file_system_info;

    Info {
        basic: Basic {
            name: item.name.clone(),
            is_dir,
        },
        details: Details {
            accessed: None,
            created: fs_info.created_date_time.map(datetime_to_epoch),
            metadata_changed: None,
            modified: fs_info.last_modified_date_time.map(datetime_to_epoch),
            size: item.size,
            resource_type: if is_dir {
                ResourceType::Directory
            } else {
                ResourceType::File
            },
        },
        photo: item.photo.clone(),
        location: item.location.clone(),
        tags: item.tags.clone(),
    }
}

/// Build the remote patch for an update request against `existing`.
///
/// A request touching an immutable field fails as a whole and yields no
/// patch. Unknown namespaces are skipped.
pub fn update_to_patch(path: &str, existing: &RemoteItem, update: &RawInfo) -> Result<ItemPatch> {
    let mut patch = ItemPatch::new(existing.id.clone());

    for (namespace, fields) in update {
        match namespace.as_str() {
            "basic" => {
                if let Some(field) = fields.keys().next() {
                    return Err(unsupported(path, namespace, field));
                }
            }
            "details" => {
                for (field, value) in fields {
                    match field.as_str() {
                        "accessed" | "metadata_changed" => {}
                        "created" => {
                            if let Some(dt) = staged_time(path, namespace, field, value)? {
                                patch.file_system_info.created_date_time = Some(dt);
                            }
                        }
                        "modified" => {
                            if let Some(dt) = staged_time(path, namespace, field, value)? {
                                patch.file_system_info.last_modified_date_time = Some(dt);
                            }
                        }
                        _ => return Err(unsupported(path, namespace, field)),
                    }
                }
            }
            _ => {}
        }
    }

    Ok(patch)
}

fn unsupported(path: &str, namespace: &str, field: &str) -> FsError {
    FsError::UnsupportedMutation {
        path: path.to_string(),
        field: format!("{namespace}.{field}"),
    }
}

/// Epoch value (integer or float seconds) to a naive UTC datetime.
/// `null` stages nothing.
fn staged_time(
    path: &str,
    namespace: &str,
    field: &str,
    value: &Value,
) -> Result<Option<NaiveDateTime>> {
    if value.is_null() {
        return Ok(None);
    }
    let secs = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.floor() as i64))
        .ok_or_else(|| unsupported(path, namespace, field))?;
    epoch_to_datetime(secs)
        .map(Some)
        .ok_or_else(|| unsupported(path, namespace, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FileFacet, FileSystemInfo, FolderFacet, ItemId};
    use chrono::NaiveDate;
    use serde_json::json;

    fn stamp(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn file_item() -> RemoteItem {
        RemoteItem {
            id: ItemId::new("f1"),
            name: "a.txt".to_string(),
            size: 2,
            folder: None,
            file: Some(FileFacet::default()),
            file_system_info: FileSystemInfo {
                created_date_time: Some(stamp(2017, 8, 7, 16, 16, 30)),
                last_modified_date_time: Some(stamp(2017, 8, 7, 16, 17, 0)),
            },
            photo: None,
            location: None,
            tags: None,
        }
    }

    fn request(value: Value) -> RawInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_epoch_conversion() {
        let dt = stamp(2017, 8, 7, 16, 16, 30);
        assert_eq!(datetime_to_epoch(dt), 1_502_122_590);
        assert_eq!(epoch_to_datetime(1_502_122_590), Some(dt));
        assert_eq!(epoch_to_datetime(0), Some(stamp(1970, 1, 1, 0, 0, 0)));
        assert_eq!(epoch_to_datetime(i64::MAX), None);
    }

    #[test]
    fn test_file_info() {
        let info = item_to_info(&file_item());
        assert_eq!(info.name(), "a.txt");
        assert!(info.is_file());
        assert_eq!(info.resource_type(), ResourceType::File);
        assert_eq!(info.size(), 2);
        assert_eq!(info.created(), Some(1_502_122_590));
        assert_eq!(info.modified(), Some(1_502_122_620));
        assert_eq!(info.details.accessed, None);
        assert_eq!(info.details.metadata_changed, None);
        assert!(!info.has_namespace("photo"));
    }

    #[test]
    fn test_folder_info() {
        let mut item = file_item();
        item.file = None;
        item.folder = Some(FolderFacet { child_count: 3 });
        let info = item_to_info(&item);
        assert!(info.is_dir());
        assert_eq!(info.resource_type(), ResourceType::Directory);
    }

    #[test]
    fn test_raw_namespaces() {
        let mut item = file_item();
        item.location = Some(Location {
            altitude: None,
            latitude: Some(1.5),
            longitude: Some(2.5),
        });
        let raw = item_to_info(&item).raw().unwrap();

        assert_eq!(raw["basic"], json!({"name": "a.txt", "is_dir": false}));
        assert_eq!(raw["details"]["type"], json!(0));
        assert_eq!(raw["details"]["accessed"], Value::Null);
        assert_eq!(raw["location"]["latitude"], json!(1.5));
        assert!(raw.get("photo").is_none());
        assert!(raw.get("tags").is_none());
    }

    #[test]
    fn test_photo_namespace_uses_snake_case() {
        let mut item = file_item();
        item.photo = Some(Photo {
            camera_make: Some("Canon".to_string()),
            f_number: Some(2.8),
            ..Photo::default()
        });
        let raw = item_to_info(&item).raw().unwrap();
        assert_eq!(raw["photo"]["camera_make"], json!("Canon"));
        assert_eq!(raw["photo"]["f_number"], json!(2.8));
    }

    #[test]
    fn test_patch_times() {
        let patch = update_to_patch(
            "/a.txt",
            &file_item(),
            &request(json!({"details": {"created": 0, "modified": 1_600_000_000.7}})),
        )
        .unwrap();

        assert_eq!(patch.id, ItemId::new("f1"));
        assert_eq!(
            patch.file_system_info.created_date_time,
            Some(stamp(1970, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            patch
                .file_system_info
                .last_modified_date_time
                .map(datetime_to_epoch),
            Some(1_600_000_000)
        );
    }

    #[test]
    fn test_patch_ignores_unsupported_times_and_namespaces() {
        let patch = update_to_patch(
            "/a.txt",
            &file_item(),
            &request(json!({
                "details": {"accessed": 5, "metadata_changed": 6},
                "custom": {"anything": true}
            })),
        )
        .unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_rejects_immutable_fields() {
        for (namespace, field, value) in [
            ("basic", "name", json!("b.txt")),
            ("basic", "is_dir", json!(true)),
            ("details", "size", json!(10)),
            ("details", "type", json!(1)),
        ] {
            let mut fields = Map::new();
            fields.insert(field.to_string(), value);
            let mut req = RawInfo::new();
            req.insert(namespace.to_string(), fields);
            let err = update_to_patch("/a.txt", &file_item(), &req).unwrap_err();
            match err {
                FsError::UnsupportedMutation { field: f, path } => {
                    assert_eq!(f, format!("{namespace}.{field}"));
                    assert_eq!(path, "/a.txt");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_patch_rejects_non_numeric_time() {
        let err = update_to_patch(
            "/a.txt",
            &file_item(),
            &request(json!({"details": {"modified": "yesterday"}})),
        )
        .unwrap_err();
        assert!(matches!(err, FsError::UnsupportedMutation { .. }));
    }

    #[test]
    fn test_null_time_stages_nothing() {
        let patch = update_to_patch(
            "/a.txt",
            &file_item(),
            &request(json!({"details": {"modified": null}})),
        )
        .unwrap();
        assert!(patch.is_empty());
    }
}
