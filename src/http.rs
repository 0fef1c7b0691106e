//! HTTP client wrapper for item API requests.

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use crate::api::{ApiError, ApiResult};
use crate::config::Config;

/// HTTP client for making requests to the item API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with reqwest defaults.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a client with the timeout and proxy from `config`.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Create a new HTTP client with a proxy.
    pub fn with_proxy(proxy: &str) -> ApiResult<Self> {
        let config = Config {
            proxy: Some(proxy.to_string()),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    /// Start a request with the given bearer token.
    pub fn request(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.client.request(method, url).bearer_auth(token)
    }

    /// Send a request, turning non-success statuses into [`ApiError::Status`].
    pub async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status = status.as_u16(), error = %e, "failed to read error body");
                String::new()
            }
        };
        Err(ApiError::from_body(status.as_u16(), &body))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
