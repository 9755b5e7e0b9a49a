use anyhow::{Context, Result};
use sentinel_config::{Config, ConfigLayerStack};

pub fn handle_config(config: &Config, layers: &ConfigLayerStack) -> Result<()> {
    print!("{}", render_config(config, layers)?);
    Ok(())
}

/// Effective config as TOML; the key itself is never printed, only where
/// it was set.
fn render_config(config: &Config, layers: &ConfigLayerStack) -> Result<String> {
    let body = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    let key_status = match (config.llm.api_key.as_deref(), layers.source_of("llm.api_key")) {
        (Some(key), Some(source)) if !key.is_empty() => format!("set (from {})", source),
        (Some(key), None) if !key.is_empty() => "set".to_string(),
        _ => "not set".to_string(),
    };
    Ok(format!("# llm.api_key: {}\n{}", key_status, body))
}
