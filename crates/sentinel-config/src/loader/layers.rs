use super::merge::{lookup, merge_values};
use crate::{error::ConfigError, Config, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Where a configuration layer came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// A configuration file
    File(PathBuf),
    /// A single environment variable
    Environment { var: String },
    /// An override supplied by the caller, e.g. a CLI flag
    Override { key: String },
}

impl fmt::Display for ConfigLayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLayerSource::File(path) => write!(f, "file {}", path.display()),
            ConfigLayerSource::Environment { var } => f.write_str(var),
            ConfigLayerSource::Override { key } => write!(f, "override of {}", key),
        }
    }
}

/// One partial configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub value: Value,
}

impl ConfigLayer {
    pub fn new(source: ConfigLayerSource, value: Value) -> Self {
        Self { source, value }
    }
}

/// Layers ordered from lowest to highest precedence
#[derive(Debug, Clone, Default)]
pub struct ConfigLayerStack {
    layers: Vec<ConfigLayer>,
}

impl ConfigLayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    /// All layers merged into one document
    pub fn effective_value(&self) -> Value {
        let mut merged = Value::Object(Map::new());
        for layer in &self.layers {
            merge_values(&mut merged, &layer.value);
        }
        merged
    }

    /// Deserialize the merged document; serde defaults fill the gaps.
    pub fn resolve(&self) -> Result<Config> {
        serde_json::from_value(self.effective_value())
            .map_err(|e| ConfigError::invalid("config", e.to_string()))
    }

    /// The highest-precedence layer that sets `key` (dotted, e.g. `llm.api_key`)
    pub fn source_of(&self, key: &str) -> Option<&ConfigLayerSource> {
        self.layers
            .iter()
            .rev()
            .find(|layer| lookup(&layer.value, key).is_some())
            .map(|layer| &layer.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::merge::nest;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn env(var: &str, key: &str, value: Value) -> ConfigLayer {
        ConfigLayer::new(
            ConfigLayerSource::Environment { var: var.to_string() },
            nest(key, value),
        )
    }

    #[test]
    fn test_empty_stack_resolves_to_defaults() {
        assert_eq!(ConfigLayerStack::new().resolve().unwrap(), Config::default());
    }

    #[test]
    fn test_source_of_reports_last_setter() {
        let mut stack = ConfigLayerStack::new();
        stack.push(ConfigLayer::new(
            ConfigLayerSource::File(PathBuf::from(".sentinel.toml")),
            json!({ "llm": { "api_key": "sk-file", "model": "gpt-4o" } }),
        ));
        stack.push(env("OPENAI_API_KEY", "llm.api_key", json!("sk-env")));

        assert_eq!(
            stack.source_of("llm.api_key").map(ToString::to_string).as_deref(),
            Some("OPENAI_API_KEY")
        );
        assert_eq!(
            stack.source_of("llm.model").map(ToString::to_string).as_deref(),
            Some("file .sentinel.toml")
        );
        assert_eq!(stack.source_of("llm.proxy"), None);

        let config = stack.resolve().unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_wrongly_typed_override_is_error() {
        let mut stack = ConfigLayerStack::new();
        stack.push(ConfigLayer::new(
            ConfigLayerSource::Override { key: "llm.timeout_secs".to_string() },
            nest("llm.timeout_secs", json!("soon")),
        ));
        assert!(matches!(stack.resolve(), Err(ConfigError::Invalid { .. })));
    }
}
