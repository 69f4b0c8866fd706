//! Input checks for command-line arguments before they reach the API.

use anyhow::{bail, Result};
use openstates_api::types::Chamber;
use openstates_api::RESERVED_PARAMS;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_ID_LENGTH: usize = 32;

/// Jurisdictions Open States covers: 50 states, DC and Puerto Rico.
pub const VALID_STATES: &[&str] = &[
    "al", "ak", "az", "ar", "ca", "co", "ct", "de", "fl", "ga", "hi", "id", "il", "in", "ia",
    "ks", "ky", "la", "me", "md", "ma", "mi", "mn", "ms", "mo", "mt", "ne", "nv", "nh", "nj",
    "nm", "ny", "nc", "nd", "oh", "ok", "or", "pa", "ri", "sc", "sd", "tn", "tx", "ut", "vt",
    "va", "wa", "wv", "wi", "wy", "dc", "pr",
];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String> {
    if input.len() > max_len {
        bail!("input exceeds maximum length of {} bytes", max_len);
    }
    let sanitized = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        bail!("input is empty after sanitization");
    }
    Ok(sanitized)
}

/// Validate a free-text search or name filter.
pub fn validate_search(input: &str) -> Result<String> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a state abbreviation. The API expects lowercase codes.
pub fn validate_state(input: &str) -> Result<String> {
    let lower = input.trim().to_lowercase();
    if VALID_STATES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        bail!(
            "unknown state code '{}'. Valid codes: al, ak, az, ... wy, dc, pr",
            input
        )
    }
}

/// Validate a chamber: upper, lower or joint, with senate/house/assembly accepted.
pub fn validate_chamber(input: &str) -> Result<Chamber> {
    match input.trim().to_lowercase().as_str() {
        "upper" | "senate" => Ok(Chamber::Upper),
        "lower" | "house" | "assembly" => Ok(Chamber::Lower),
        "joint" => Ok(Chamber::Joint),
        _ => bail!(
            "unknown chamber '{}'. Valid values: upper (senate), lower (house, assembly), joint",
            input
        ),
    }
}

/// Validate an Open States object ID such as `TXL000139`.
pub fn validate_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_ID_LENGTH {
        bail!("ID must be between 1 and {} characters", MAX_ID_LENGTH);
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("ID '{}' must contain only letters and digits", input);
    }
    Ok(trimmed.to_uppercase())
}

/// Parse a pass-through filter given as `key=value`.
pub fn parse_filter(input: &str) -> Result<(String, String)> {
    let Some((key, value)) = input.split_once('=') else {
        bail!("filter '{}' must have the form key=value", input);
    };
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("filter key '{}' must be letters, digits or underscores", key);
    }
    if RESERVED_PARAMS.contains(&key) {
        bail!("filter key '{}' is set by the client and cannot be overridden", key);
    }
    Ok((key.to_string(), sanitize_text(value, MAX_SEARCH_LENGTH)?))
}

/// Validate a latitude/longitude pair in decimal degrees.
pub fn validate_coordinates(lat: f64, long: f64) -> Result<(f64, f64)> {
    if !(-90.0..=90.0).contains(&lat) {
        bail!("latitude {} is outside -90..90", lat);
    }
    if !(-180.0..=180.0).contains(&long) {
        bail!("longitude {} is outside -180..180", long);
    }
    Ok((lat, long))
}
