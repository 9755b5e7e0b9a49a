//! JSON format parser

use crate::{error::ConfigError, loader::ConfigFormat, Config, Result};
use serde::de::DeserializeOwned;

/// Parse configuration from JSON string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Deserialize `content`; errors name `path` and quote the failing lines
pub fn parse_with_path<T: DeserializeOwned>(content: &str, path: Option<&str>) -> Result<T> {
    serde_json::from_str(content).map_err(|e| {
        ConfigError::parse(
            ConfigFormat::Json,
            path,
            e.to_string(),
            content,
            Some(e.line()),
            Some(e.column()),
        )
    })
}
