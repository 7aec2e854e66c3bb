//! Access-token acquisition for the softphone session.

use async_trait::async_trait;
use serde::Deserialize;

use centro_core::config::ClientConfig;
use centro_core::error::{AppError, ErrorKind};

/// A token obtained from the minting endpoint.
#[derive(Debug, Clone)]
pub struct FetchedToken {
    pub token: String,
    /// Identity the server actually granted.
    pub identity: String,
}

/// Where the session gets its access tokens, at startup and on refresh.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch(&self, identity: &str) -> Result<FetchedToken, AppError>;
}

/// Wire shape of the token endpoint: `{ token, identity }` on success,
/// `{ error }` on failure, both with status codes the client ignores.
#[derive(Debug, Deserialize)]
struct TokenEndpointBody {
    token: Option<String>,
    identity: Option<String>,
    error: Option<String>,
}

/// Fetches tokens from the minting endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    client: reqwest::Client,
    token_url: String,
}

impl HttpTokenSource {
    /// Creates a source posting to the given token endpoint URL.
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: token_url.into(),
        }
    }

    /// Creates a source from the client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.token_url.clone())
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn fetch(&self, identity: &str) -> Result<FetchedToken, AppError> {
        let response = self
            .client
            .post(&self.token_url)
            .json(&serde_json::json!({ "identity": identity }))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Token request failed", e)
            })?;

        let body: TokenEndpointBody = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Token endpoint returned an unreadable response",
                e,
            )
        })?;

        if let Some(error) = body.error {
            return Err(AppError::new(ErrorKind::ExternalService, error));
        }

        match body.token {
            Some(token) => Ok(FetchedToken {
                token,
                identity: body.identity.unwrap_or_else(|| identity.to_string()),
            }),
            None => Err(AppError::external_service(
                "Token endpoint response had no token",
            )),
        }
    }
}

/// Returns a fixed token on every fetch. Test and development double.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
    identity: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            identity: identity.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn fetch(&self, _identity: &str) -> Result<FetchedToken, AppError> {
        Ok(FetchedToken {
            token: self.token.clone(),
            identity: self.identity.clone(),
        })
    }
}
