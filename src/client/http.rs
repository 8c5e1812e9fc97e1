//! HTTP transport
//!
//! Client configuration, the error type shared by every client operation, and
//! the `reqwest` backed [`Transport`] used against the live service.

use std::sync::Arc;

use reqwest::{header, Client as ReqwestClient, Error as ReqwestError};

use super::Transport;
use crate::models::{Language, ModelError};

/// Base path every SKELL endpoint lives under
pub const DEFAULT_BASE_URL: &str = "https://skell.sketchengine.eu/api/run.cgi";

/// The service rejects default client identifiers, so requests pose as a browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

pub type Result<T> = std::result::Result<T, SkellError>;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub language: Language,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: Language::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }
}

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum SkellError {
    #[error("HTTP error: {0}")]
    Http(#[from] ReqwestError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Word sketch for \"{0}\" was fetched without a part of speech")]
    MissingKind(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// [`Transport`] performing real HTTP requests
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Arc<ReqwestClient>,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            http_client: Arc::new(ReqwestClient::new()),
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
