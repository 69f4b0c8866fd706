//! Client configuration and URL building for the Open States API.

use std::sync::Arc;

use url::Url;

use crate::{
    config::{self, Config},
    query::Query,
    transport::{HttpTransport, Transport},
    Error,
};

/// Query parameters the client always sets itself. Filters using these keys
/// are dropped.
pub const RESERVED_PARAMS: &[&str] = &["format", "apikey"];

/// Entry point for all requests: base URL, API key and transport.
///
/// Cloning is cheap; every entity handle keeps a clone so it can fetch
/// itself later.
#[derive(Clone)]
pub struct Client {
    /// Base URL for the API. Defaults to [`config::DEFAULT_BASE_URL`].
    base_api_url: String,
    /// Client-level key. Falls back to the process-wide key when unset.
    api_key: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client for the production API using the process-wide key.
    pub fn new() -> Result<Self, Error> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            base_api_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            transport: Arc::new(HttpTransport::new(config.timeout)?),
        })
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::from_config(&Config {
            base_url: base_url.to_string(),
            ..Config::default()
        })
    }

    /// Uses `key` instead of the process-wide key.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Builds `base/{segments..}/?format=json&apikey=KEY&...`.
    ///
    /// Segments are percent-encoded individually and the path always ends in
    /// exactly one slash before the query.
    pub fn build_url<Q: Query + ?Sized>(&self, segments: &[&str], query: &Q) -> Result<Url, Error> {
        let api_key = self.resolve_api_key()?;
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::Configuration(format!("invalid base URL `{}`: {}", self.base_api_url, e))
        })?;
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| {
                Error::Configuration(format!(
                    "base URL `{}` cannot hold a path",
                    self.base_api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments)
            .push("");
        let filters: Vec<(String, String)> = query
            .add_to_url(&url)
            .query_pairs()
            .filter(|(key, _)| {
                let reserved = RESERVED_PARAMS.contains(&&**key);
                if reserved {
                    tracing::warn!("Ignoring filter `{}`: set by the client", key);
                }
                !reserved
            })
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("apikey", &api_key)
            .extend_pairs(filters);
        Ok(url)
    }

    fn resolve_api_key(&self) -> Result<String, Error> {
        self.api_key
            .clone()
            .or_else(config::api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration("API key is not set".to_string()))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
