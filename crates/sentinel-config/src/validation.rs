//! Validation trait and helpers for configuration types

use crate::error::{ConfigError, Result};
use url::Url;

/// Trait for validating configuration values
///
/// Implement this for any config type that needs checks beyond what the
/// type system gives. Errors should name the offending field.
pub trait Validate {
    /// Returns `Ok(())` if validation passes, or a `ConfigError` describing
    /// what failed and why.
    fn validate(&self) -> Result<()>;
}

/// Validate that a value lies within `min..=max`
pub fn validate_range(field: impl Into<String>, value: f32, min: f32, max: f32) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Parse an absolute http(s) URL with a host
pub fn parse_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::invalid(field, format!("'{}' is not a valid URL: {}", value, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            field,
            format!("'{}' must use http or https, not {}", value, url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::invalid(field, format!("'{}' has no host", value)));
    }

    Ok(url)
}

/// Validate that a string is an absolute http(s) URL
pub fn validate_http_url(field: &str, value: &str) -> Result<()> {
    parse_http_url(field, value).map(|_| ())
}
