//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `SENTINEL_<section>_<field>=value`
//!
//! Examples:
//! - `SENTINEL_LLM_MODEL=gpt-4o`
//! - `SENTINEL_LLM_TIMEOUT_SECS=60`
//! - `SENTINEL_REPORT_PROMPT_PATH=out/prompt.txt`
//!
//! The provider variables `OPENAI_API_KEY`, `OPENAI_GPT_MODEL` and
//! `HTTP_PROXY` are also honoured; `SENTINEL_*` wins when both are set.

use super::layers::{ConfigLayer, ConfigLayerSource};
use super::merge::nest;
use crate::{error::ConfigError, types::LogLevel, Result};
use serde_json::Value;

const PREFIX: &str = "SENTINEL_";

/// Provider variables and the key each one sets
const PROVIDER_VARS: [(&str, &str); 3] = [
    ("OPENAI_API_KEY", "llm.api_key"),
    ("OPENAI_GPT_MODEL", "llm.model"),
    ("HTTP_PROXY", "llm.proxy"),
];

/// Layers for the process environment
pub fn from_env() -> Result<Vec<ConfigLayer>> {
    from_vars(std::env::vars())
}

/// One layer per relevant `(name, value)` pair, provider variables first
///
/// Empty values are skipped, as are unknown `SENTINEL_` names (with a
/// warning). Values that do not parse are errors.
pub fn from_vars<I>(vars: I) -> Result<Vec<ConfigLayer>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut provider = Vec::new();
    let mut prefixed = Vec::new();

    for (var, value) in vars {
        if value.is_empty() {
            continue;
        }
        if let Some(rest) = var.strip_prefix(PREFIX) {
            let Some(key) = prefixed_key(rest) else {
                eprintln!("Warning: ignoring {}: not a known setting", var);
                continue;
            };
            let value = typed_value(&var, key, &value)?;
            prefixed.push(layer(var, key, value));
        } else if let Some((_, key)) = PROVIDER_VARS.iter().find(|(name, _)| *name == var) {
            provider.push(layer(var, key, Value::String(value)));
        }
    }

    provider.extend(prefixed);
    Ok(provider)
}

fn layer(var: String, key: &str, value: Value) -> ConfigLayer {
    ConfigLayer::new(ConfigLayerSource::Environment { var }, nest(key, value))
}

/// `LLM_TIMEOUT_SECS` -> `llm.timeout_secs`
fn prefixed_key(rest: &str) -> Option<&'static str> {
    const KEYS: [&str; 11] = [
        "llm.model",
        "llm.api_key",
        "llm.api_base",
        "llm.proxy",
        "llm.timeout_secs",
        "llm.temperature",
        "report.prompt_path",
        "logging.level",
        "logging.file_enabled",
        "logging.file",
        "logging.max_file_bytes",
    ];

    let wanted = rest.to_lowercase();
    KEYS.into_iter()
        .find(|key| key.replacen('.', "_", 1) == wanted)
}

fn typed_value(var: &str, key: &str, value: &str) -> Result<Value> {
    Ok(match key {
        "llm.timeout_secs" | "logging.max_file_bytes" => {
            let number: u64 = value
                .parse()
                .map_err(|_| ConfigError::env_var(var, format!("expected a whole number, got '{}'", value)))?;
            Value::from(number)
        }
        "llm.temperature" => {
            let temperature: f64 = value
                .parse()
                .map_err(|_| ConfigError::env_var(var, format!("expected a number, got '{}'", value)))?;
            Value::from(temperature)
        }
        "logging.file_enabled" => Value::Bool(parse_bool(var, value)?),
        "logging.level" => Value::from(LogLevel::parse(value)?.as_str()),
        _ => Value::String(value.to_string()),
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_var(
            var,
            format!("expected true/false, got '{}'", value),
        )),
    }
}
