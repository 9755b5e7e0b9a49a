//! File-based configuration loading

use super::formats::{json, toml, yaml};
use crate::{error::ConfigError, loader::ConfigFormat, Config, Result, Validate};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load and validate configuration from a file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let (_, _, config) = read_valid(path.as_ref())?;
    Ok(config)
}

/// The keys a file actually sets, after checking that it is a valid
/// configuration on its own
pub fn load_layer(path: &Path) -> Result<Value> {
    let (format, content, _) = read_valid(path)?;
    parse_as(format, &content, path)
}

fn read_valid(path: &Path) -> Result<(ConfigFormat, String, Config)> {
    let (format, content) = read(path)?;
    let config: Config = parse_as(format, &content, path)?;
    config.validate()?;
    Ok((format, content, config))
}

fn read(path: &Path) -> Result<(ConfigFormat, String)> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = detect_format(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((format, content))
}

fn parse_as<T: DeserializeOwned>(format: ConfigFormat, content: &str, path: &Path) -> Result<T> {
    let path = path.to_str();
    match format {
        ConfigFormat::Yaml => yaml::parse_with_path(content, path),
        ConfigFormat::Toml => toml::parse_with_path(content, path),
        ConfigFormat::Json => json::parse_with_path(content, path),
    }
}

/// Detect configuration format from file extension
pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some("json") => Ok(ConfigFormat::Json),
        _ => Err(ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}
