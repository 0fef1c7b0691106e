//! Credential provider seam.
//!
//! Token acquisition and refresh live outside this crate. The client only
//! asks for a bearer token before each request.

use async_trait::async_trait;

use crate::api::{ApiError, ApiResult};

/// Supplies bearer tokens for API requests.
///
/// Implementations are expected to refresh transparently.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> ApiResult<String>;
}

/// A fixed, pre-acquired access token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read a token from an environment variable.
    pub fn from_env(var: &str) -> ApiResult<Self> {
        std::env::var(var)
            .map(Self)
            .map_err(|_| ApiError::Auth(format!("environment variable {var} is not set")))
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> ApiResult<String> {
        if self.0.is_empty() {
            return Err(ApiError::Auth("empty access token".to_string()));
        }
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let token = StaticToken::new("abc");
        assert_eq!(token.access_token().await.unwrap(), "abc");
        assert!(!format!("{token:?}").contains("abc"));
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let token = StaticToken::new("");
        assert!(matches!(
            token.access_token().await,
            Err(ApiError::Auth(_))
        ));
    }

    #[test]
    fn test_missing_env_var() {
        let res = StaticToken::from_env("ONEDRIVEFS_TEST_TOKEN_THAT_IS_NOT_SET");
        assert!(res.is_err());
    }
}
