//! Process-wide API key and client configuration.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Root of the v1 API. Resource paths are appended to it.
pub const DEFAULT_BASE_URL: &str = "http://openstates.sunlightlabs.com/api/v1/";

/// Transport timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static API_KEY: RwLock<Option<String>> = RwLock::new(None);

/// Sets the API key sent with every request from clients that were not
/// given their own key.
pub fn set_api_key(key: impl Into<String>) {
    *API_KEY.write().unwrap_or_else(PoisonError::into_inner) = Some(key.into());
}

/// Returns the process-wide API key, if one was set.
pub fn api_key() -> Option<String> {
    API_KEY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Settings for building a [`Client`](crate::Client).
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    /// Client-level key. `None` falls back to [`api_key`] at request time.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Reads `OPENSTATES_API_URL`, `OPENSTATES_API_KEY` and
    /// `OPENSTATES_TIMEOUT_SECS`. Missing or unparseable values keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: var("OPENSTATES_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.base_url),
            api_key: var("OPENSTATES_API_KEY").filter(|key| !key.trim().is_empty()),
            timeout: var("OPENSTATES_TIMEOUT_SECS")
                .and_then(|val| val.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
