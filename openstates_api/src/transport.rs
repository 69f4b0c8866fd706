//! HTTP transport seam.
//!
//! The entity layer only needs "GET this URL, give me status and body".
//! [`HttpTransport`] provides that over `reqwest`; tests plug in their own.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::Error;

const USER_AGENT: &str = concat!("openstates-rs/", env!("CARGO_PKG_VERSION"));

/// Status code and body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single `GET`. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, Error>;
}

/// `reqwest`-backed transport with a fixed timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, Error> {
        // Errors are rendered without the URL so the API key never reaches logs.
        let resp = self
            .client
            .get(url.clone())
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to get resource {}: {}", url.path(), e);
                Error::Transport(e.to_string())
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e.to_string())
        })?;

        Ok(HttpResponse { status, body })
    }
}
