//! Lazy, page-at-a-time directory scanning.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::api::{ItemApi, ItemId, PageCursor};
use crate::error::{FsError, Result};

use super::info::{Info, item_to_info};

/// Stream of directory entries, in service order.
pub type InfoStream = BoxStream<'static, Result<Info>>;

enum Page {
    First,
    Next(PageCursor),
    Done,
}

/// Stream the children of `folder`, fetching the next page only once the
/// previous one has been consumed. A failed page fetch ends the stream
/// with that error.
pub(crate) fn children(client: Arc<dyn ItemApi>, path: String, folder: ItemId) -> InfoStream {
    stream::try_unfold(Page::First, move |page| {
        let client = client.clone();
        let path = path.clone();
        let folder = folder.clone();
        async move {
            let cursor = match page {
                Page::First => None,
                Page::Next(cursor) => Some(cursor),
                Page::Done => return Ok(None),
            };

            let fetched = client
                .children(&folder, cursor.as_ref())
                .await
                .map_err(|e| FsError::from_api(&path, e))?;
            debug!(
                path = %path,
                entries = fetched.items.len(),
                more = fetched.next.is_some(),
                "children page"
            );

            let following = match fetched.next {
                Some(next) => Page::Next(next),
                None => Page::Done,
            };
            let infos: Vec<Result<Info>> =
                fetched.items.iter().map(|item| Ok(item_to_info(item))).collect();
            Ok::<_, FsError>(Some((stream::iter(infos), following)))
        }
    })
    .try_flatten()
    .boxed()
}
