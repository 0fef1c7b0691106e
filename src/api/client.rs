//! OneDrive REST client implementing [`ItemApi`].

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use super::error::ApiError;
use super::item::{ChildrenPage, ItemId, ItemPatch, PageCursor, RemoteItem};
use super::{ApiResult, ItemApi};
use crate::auth::CredentialProvider;
use crate::config::Config;
use crate::http::HttpClient;

/// Header the service echoes back for request correlation.
const REQUEST_ID_HEADER: &str = "client-request-id";

/// OneDrive item API client.
pub struct OneDriveClient {
    http: HttpClient,
    base: Url,
    credentials: Arc<dyn CredentialProvider>,
    page_size: Option<u32>,
    request_id: AtomicU32,
}

impl OneDriveClient {
    /// Create a client for the API root and transport settings in `config`.
    pub fn new(config: &Config, credentials: Arc<dyn CredentialProvider>) -> ApiResult<Self> {
        let mut base = Url::parse(&config.api_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        if base.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self {
            http: HttpClient::from_config(config)?,
            base,
            credentials,
            page_size: config.page_size,
            request_id: AtomicU32::new(rand::random()),
        })
    }

    /// API root every request is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL from raw path segments, escaping each one.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> ApiResult<Url> {
        let mut endpoint = self.base.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(endpoint)
    }

    /// Address an item by path: `drive/root:/a/b` or, with an action,
    /// `drive/root:/a/b:/action`. The root itself is `drive/root`.
    fn path_endpoint(&self, path: &str, action: Option<&str>) -> ApiResult<Url> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let Some((last, parents)) = parts.split_last() else {
            return match action {
                None => self.endpoint(["drive", "root"]),
                Some(_) => Err(ApiError::InvalidPath(path.to_string())),
            };
        };

        let mut segments = vec!["drive".to_string(), "root:".to_string()];
        segments.extend(parents.iter().map(|p| p.to_string()));
        match action {
            Some(action) => {
                segments.push(format!("{last}:"));
                segments.push(action.to_string());
            }
            None => segments.push(last.to_string()),
        }
        self.endpoint(segments.iter().map(String::as_str))
    }

    fn item_endpoint(&self, id: &ItemId, action: Option<&str>) -> ApiResult<Url> {
        match action {
            Some(action) => self.endpoint(["drive", "items", id.as_str(), action]),
            None => self.endpoint(["drive", "items", id.as_str()]),
        }
    }

    /// Resolve a next-page cursor, refusing links that leave the API origin
    /// since the bearer token travels with them.
    fn cursor_endpoint(&self, cursor: &PageCursor) -> ApiResult<Url> {
        let url = Url::parse(cursor.as_str())?;
        if url.origin() != self.base.origin() {
            return Err(ApiError::InvalidResponse);
        }
        Ok(url)
    }

    async fn start(&self, method: Method, url: Url) -> ApiResult<RequestBuilder> {
        let token = self.credentials.access_token().await?;
        let request_id = self.request_id.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        debug!(method = method.as_str(), url = url.as_str(), request_id, "api request");
        Ok(self
            .http
            .request(method, url, &token)
            .header(REQUEST_ID_HEADER, request_id.to_string()))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let text = response.text().await?;
        debug!(bytes = text.len(), "api response");
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for OneDriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneDriveClient")
            .field("base", &self.base.as_str())
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ItemApi for OneDriveClient {
    async fn item_by_path(&self, path: &str) -> ApiResult<RemoteItem> {
        let url = self.path_endpoint(path, None)?;
        let request = self.start(Method::GET, url).await?;
        Self::json(self.http.send(request).await?).await
    }

    async fn children(
        &self,
        folder: &ItemId,
        cursor: Option<&PageCursor>,
    ) -> ApiResult<ChildrenPage> {
        let url = match cursor {
            Some(cursor) => self.cursor_endpoint(cursor)?,
            None => {
                let mut url = self.item_endpoint(folder, Some("children"))?;
                if let Some(top) = self.page_size {
                    url.query_pairs_mut().append_pair("$top", &top.to_string());
                }
                url
            }
        };
        let request = self.start(Method::GET, url).await?;
        let page: ChildrenPage = Self::json(self.http.send(request).await?).await?;
        debug!(
            folder = %folder,
            items = page.items.len(),
            more = page.next.is_some(),
            "children page"
        );
        Ok(page)
    }

    async fn create_folder(&self, parent: &ItemId, name: &str) -> ApiResult<RemoteItem> {
        let url = self.item_endpoint(parent, Some("children"))?;
        let request = self.start(Method::POST, url).await?.json(&json!({
            "name": name,
            "folder": {},
            "@microsoft.graph.conflictBehavior": "fail"
        }));
        Self::json(self.http.send(request).await?).await
    }

    async fn update(&self, patch: &ItemPatch) -> ApiResult<RemoteItem> {
        let url = self.item_endpoint(&patch.id, None)?;
        let request = self.start(Method::PATCH, url).await?.json(patch);
        Self::json(self.http.send(request).await?).await
    }

    async fn delete(&self, item: &ItemId) -> ApiResult<()> {
        let url = self.item_endpoint(item, None)?;
        let request = self.start(Method::DELETE, url).await?;
        self.http.send(request).await?;
        Ok(())
    }

    async fn download_to(&self, item: &ItemId, local: &Path) -> ApiResult<()> {
        let url = self.item_endpoint(item, Some("content"))?;
        let request = self.start(Method::GET, url).await?;
        let response = self.http.send(request).await?;

        let mut file = tokio::fs::File::create(local).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        debug!(item = %item, bytes = written, "download complete");
        Ok(())
    }

    async fn upload_from(&self, path: &str, local: &Path) -> ApiResult<RemoteItem> {
        let url = self.path_endpoint(path, Some("content"))?;
        let data = tokio::fs::read(local).await?;
        debug!(path, bytes = data.len(), "upload");
        let request = self
            .start(Method::PUT, url)
            .await?
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data);
        Self::json(self.http.send(request).await?).await
    }
}
