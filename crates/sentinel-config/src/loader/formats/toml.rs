//! TOML format parser

use crate::{error::ConfigError, loader::ConfigFormat, Config, Result};
use serde::de::DeserializeOwned;

/// Parse configuration from TOML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Deserialize `content`; errors name `path` and quote the failing lines
pub fn parse_with_path<T: DeserializeOwned>(content: &str, path: Option<&str>) -> Result<T> {
    ::toml::from_str(content).map_err(|e| {
        let line = e
            .span()
            .map(|span| content[..span.start].matches('\n').count() + 1);
        ConfigError::parse(ConfigFormat::Toml, path, e.message(), content, line, None)
    })
}
