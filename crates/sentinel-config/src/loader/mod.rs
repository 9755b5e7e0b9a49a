//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod layers;
pub mod merge;

pub use layers::{ConfigLayer, ConfigLayerSource, ConfigLayerStack};

use crate::{Config, Result, Validate};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        })
    }
}

/// Files searched by [`Config::load`], in order
pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
    ".sentinel.toml",
    ".sentinel.yml",
    ".sentinel.yaml",
    ".sentinel.json",
];

enum Source {
    File(PathBuf),
    Environment,
    Variables(Vec<(String, String)>),
    Override(String, Value),
}

/// Builder for loading and merging configurations
///
/// Supports layered configuration with proper precedence:
/// defaults < file < environment < explicit overrides
///
/// A layer only replaces the keys it actually sets, so an environment
/// variable equal to the built-in default still beats the file.
///
/// # Example
///
/// ```no_run
/// use sentinel_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".sentinel.toml")
///     .with_env()
///     .with_override("llm.model", "gpt-4o")
///     .build()?;
/// # Ok::<(), sentinel_config::ConfigError>(())
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    sources: Vec<Source>,
}

impl ConfigBuilder {
    /// Create a new config builder starting with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources.push(Source::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add the first of [`DEFAULT_CONFIG_FILES`] present in the working
    /// directory, if any
    pub fn with_default_file(self) -> Self {
        match DEFAULT_CONFIG_FILES
            .iter()
            .find(|path| Path::new(path).exists())
        {
            Some(path) => self.with_file(path),
            None => self,
        }
    }

    /// Add environment variable overlay
    pub fn with_env(mut self) -> Self {
        self.sources.push(Source::Environment);
        self
    }

    /// Add an overlay from explicit `(name, value)` pairs
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.sources.push(Source::Variables(vars));
        self
    }

    /// Set one dotted key (e.g. `llm.model`) above every other layer
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sources.push(Source::Override(key.into(), value.into()));
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<Config> {
        self.build_layered().map(|(config, _)| config)
    }

    /// Like [`build`](Self::build), also returning the layers so callers
    /// can tell where a value came from
    pub fn build_layered(self) -> Result<(Config, ConfigLayerStack)> {
        let mut stack = ConfigLayerStack::new();

        for source in self.sources {
            match source {
                Source::File(path) => {
                    let value = file::load_layer(&path)?;
                    stack.push(ConfigLayer::new(ConfigLayerSource::File(path), value));
                }
                Source::Environment => {
                    for layer in env::from_env()? {
                        stack.push(layer);
                    }
                }
                Source::Variables(vars) => {
                    for layer in env::from_vars(vars)? {
                        stack.push(layer);
                    }
                }
                Source::Override(key, value) => {
                    let value = merge::nest(&key, value);
                    stack.push(ConfigLayer::new(ConfigLayerSource::Override { key }, value));
                }
            }
        }

        let config = stack.resolve()?;
        config.validate()?;
        Ok((config, stack))
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Uses the first of [`DEFAULT_CONFIG_FILES`] found in the working
    /// directory, falling back to defaults, then applies the environment.
    pub fn load() -> Result<Self> {
        ConfigBuilder::new().with_default_file().with_env().build()
    }

    /// Load configuration from a specific file, then apply the environment
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}
