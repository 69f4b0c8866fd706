//! Scalar decoders turning raw JSON values into typed values.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Textual layout of every timestamp the API emits (`2011-03-10 10:23:34`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A raw value did not match the type or textual format a field declares.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("expected {expected}, found {found}")]
pub struct FormatError {
    /// What the decoder accepts.
    pub expected: String,
    /// Short rendering of the offending value.
    pub found: String,
}

impl FormatError {
    pub(crate) fn new(expected: impl fmt::Display, raw: &Value) -> Self {
        Self {
            expected: expected.to_string(),
            found: describe(raw),
        }
    }
}

/// Identity pass-through into the declared Rust type.
pub fn plain<T: DeserializeOwned>(raw: &Value) -> Result<T, FormatError> {
    serde_json::from_value(raw.clone())
        .map_err(|e| FormatError::new(format!("a value of the declared type ({})", e), raw))
}

/// Decodes a nullable `YYYY-MM-DD HH:MM:SS` timestamp. No timezone is applied.
pub fn timestamp(raw: &Value) -> Result<Option<NaiveDateTime>, FormatError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(text) => NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(|_| FormatError::new(format!("a timestamp like `{}`", TIMESTAMP_FORMAT), raw)),
        other => Err(FormatError::new("a timestamp string or null", other)),
    }
}

fn describe(raw: &Value) -> String {
    const MAX: usize = 60;
    let rendered = raw.to_string();
    if rendered.len() <= MAX {
        rendered
    } else {
        let mut end = MAX;
        while !rendered.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &rendered[..end])
    }
}
