//! YAML format parser

use crate::{error::ConfigError, loader::ConfigFormat, Config, Result};
use serde::de::DeserializeOwned;

/// Parse configuration from YAML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Deserialize `content`; errors name `path` and quote the failing lines
pub fn parse_with_path<T: DeserializeOwned>(content: &str, path: Option<&str>) -> Result<T> {
    serde_yaml::from_str(content).map_err(|e| {
        let location = e.location();
        ConfigError::parse(
            ConfigFormat::Yaml,
            path,
            e.to_string(),
            content,
            location.as_ref().map(|l| l.line()),
            location.as_ref().map(|l| l.column()),
        )
    })
}
