//! Error types for the API client.

use crate::decode::FormatError;

/// Errors that can occur when building requests, fetching resources, or
/// decoding fields.
///
/// Errors are `Clone` because a failed handle hands the same captured error
/// to every later accessor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request never produced a response (connection, DNS, timeout, or
    /// body read failure).
    #[error("Request failed: {0}")]
    Transport(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not valid JSON or did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// A single field could not be decoded into its declared type.
    #[error("Failed to decode field `{field}`: {source}")]
    Format {
        field: &'static str,
        #[source]
        source: FormatError,
    },
    /// The client is not usable as configured (missing API key, empty path
    /// segment, bad base URL).
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// The retrieval was aborted before it completed.
    #[error("Request was cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn format(field: &'static str, source: FormatError) -> Self {
        Self::Format { field, source }
    }
}
