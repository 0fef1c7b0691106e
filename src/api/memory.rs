//! In-memory item store used by the adapter tests.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::{ApiError, ApiErrorCode};
use super::item::{
    ChildrenPage, FileFacet, FileSystemInfo, FolderFacet, ItemId, ItemPatch, PageCursor,
    RemoteItem,
};
use super::{ApiResult, ItemApi};
use crate::path::{basename, dirname, join};

struct Entry {
    path: String,
    item: RemoteItem,
    content: Vec<u8>,
}

/// Remote drive kept in memory, paging children `page_size` at a time.
pub(crate) struct MemoryDrive {
    entries: Mutex<Vec<Entry>>,
    next_id: AtomicUsize,
    page_size: usize,
    fail_uploads: AtomicBool,
    children_calls: AtomicUsize,
    deletes: AtomicUsize,
    updates: AtomicUsize,
}

fn status(status: u16, code: ApiErrorCode) -> ApiError {
    ApiError::Status {
        status,
        code,
        message: code.description().to_string(),
    }
}

fn not_found() -> ApiError {
    status(404, ApiErrorCode::ItemNotFound)
}

fn epoch_2020() -> FileSystemInfo {
    let stamp = NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0));
    FileSystemInfo {
        created_date_time: stamp,
        last_modified_date_time: stamp,
    }
}

impl MemoryDrive {
    pub(crate) fn new() -> Self {
        Self::with_page_size(200)
    }

    pub(crate) fn with_page_size(page_size: usize) -> Self {
        let root = RemoteItem {
            id: ItemId::new("root"),
            name: "root".to_string(),
            size: 0,
            folder: Some(FolderFacet::default()),
            file: None,
            file_system_info: epoch_2020(),
            photo: None,
            location: None,
            tags: None,
        };
        Self {
            entries: Mutex::new(vec![Entry {
                path: "/".to_string(),
                item: root,
                content: Vec::new(),
            }]),
            next_id: AtomicUsize::new(1),
            page_size: page_size.max(1),
            fail_uploads: AtomicBool::new(false),
            children_calls: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    fn new_item(&self, name: &str, folder: bool, size: u64) -> RemoteItem {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RemoteItem {
            id: ItemId::new(format!("item-{id}")),
            name: name.to_string(),
            size,
            folder: folder.then(FolderFacet::default),
            file: (!folder).then(FileFacet::default),
            file_system_info: epoch_2020(),
            photo: None,
            location: None,
            tags: None,
        }
    }

    /// Seed a folder; the parent must already exist.
    pub(crate) fn add_folder(&self, path: &str) -> RemoteItem {
        let item = self.new_item(basename(path), true, 0);
        self.entries.lock().unwrap().push(Entry {
            path: path.to_string(),
            item: item.clone(),
            content: Vec::new(),
        });
        item
    }

    /// Seed a file; the parent must already exist.
    pub(crate) fn add_file(&self, path: &str, content: &[u8]) -> RemoteItem {
        let item = self.new_item(basename(path), false, content.len() as u64);
        self.entries.lock().unwrap().push(Entry {
            path: path.to_string(),
            item: item.clone(),
            content: content.to_vec(),
        });
        item
    }

    /// Seed an arbitrary item record at `path`.
    pub(crate) fn add_item(&self, path: &str, item: RemoteItem) {
        self.entries.lock().unwrap().push(Entry {
            path: path.to_string(),
            item,
            content: Vec::new(),
        });
    }

    pub(crate) fn content(&self, path: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.content.clone())
    }

    pub(crate) fn contains(&self, path: &str) -> bool {
        self.entries.lock().unwrap().iter().any(|e| e.path == path)
    }

    pub(crate) fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn children_calls(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub(crate) fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemApi for MemoryDrive {
    async fn item_by_path(&self, path: &str) -> ApiResult<RemoteItem> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.item.clone())
            .ok_or_else(not_found)
    }

    async fn children(
        &self,
        folder: &ItemId,
        cursor: Option<&PageCursor>,
    ) -> ApiResult<ChildrenPage> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().unwrap();
        let parent = entries
            .iter()
            .find(|e| &e.item.id == folder)
            .ok_or_else(not_found)?;
        if !parent.item.is_folder() {
            return Err(status(400, ApiErrorCode::InvalidRequest));
        }

        let children: Vec<&Entry> = entries
            .iter()
            .filter(|e| e.path != "/" && dirname(&e.path) == parent.path)
            .collect();

        let offset = match cursor {
            Some(cursor) => cursor
                .as_str()
                .strip_prefix("offset:")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or(ApiError::InvalidResponse)?,
            None => 0,
        };
        let end = (offset + self.page_size).min(children.len());
        let items = children[offset.min(end)..end]
            .iter()
            .map(|e| e.item.clone())
            .collect();
        let next = (end < children.len()).then(|| PageCursor::new(format!("offset:{end}")));

        Ok(ChildrenPage { items, next })
    }

    async fn create_folder(&self, parent: &ItemId, name: &str) -> ApiResult<RemoteItem> {
        let parent_path = {
            let entries = self.entries.lock().unwrap();
            let parent = entries
                .iter()
                .find(|e| &e.item.id == parent)
                .ok_or_else(not_found)?;
            parent.path.clone()
        };
        let path = join(&parent_path, name);
        if self.contains(&path) {
            return Err(status(409, ApiErrorCode::NameAlreadyExists));
        }
        Ok(self.add_folder(&path))
    }

    async fn update(&self, patch: &ItemPatch) -> ApiResult<RemoteItem> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.item.id == patch.id)
            .ok_or_else(not_found)?;
        let info = &mut entry.item.file_system_info;
        if let Some(created) = patch.file_system_info.created_date_time {
            info.created_date_time = Some(created);
        }
        if let Some(modified) = patch.file_system_info.last_modified_date_time {
            info.last_modified_date_time = Some(modified);
        }
        Ok(entry.item.clone())
    }

    async fn delete(&self, item: &ItemId) -> ApiResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let path = entries
            .iter()
            .find(|e| &e.item.id == item)
            .map(|e| e.path.clone())
            .ok_or_else(not_found)?;
        let prefix = format!("{path}/");
        entries.retain(|e| e.path != path && !e.path.starts_with(&prefix));
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn download_to(&self, item: &ItemId, local: &Path) -> ApiResult<()> {
        let content = {
            let entries = self.entries.lock().unwrap();
            let entry = entries
                .iter()
                .find(|e| &e.item.id == item)
                .ok_or_else(not_found)?;
            entry.content.clone()
        };
        tokio::fs::write(local, content).await?;
        Ok(())
    }

    async fn upload_from(&self, path: &str, local: &Path) -> ApiResult<RemoteItem> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(status(507, ApiErrorCode::QuotaLimitReached));
        }
        let data = tokio::fs::read(local).await?;

        let mut entries = self.entries.lock().unwrap();
        let parent_ok = entries
            .iter()
            .any(|e| e.path == dirname(path) && e.item.is_folder());
        if !parent_ok {
            return Err(not_found());
        }

        if let Some(entry) = entries.iter_mut().find(|e| e.path == path) {
            if entry.item.is_folder() {
                return Err(status(409, ApiErrorCode::NameAlreadyExists));
            }
            entry.item.size = data.len() as u64;
            entry.content = data;
            return Ok(entry.item.clone());
        }

        let item = self.new_item(basename(path), false, data.len() as u64);
        entries.push(Entry {
            path: path.to_string(),
            item: item.clone(),
            content: data,
        });
        Ok(item)
    }
}
