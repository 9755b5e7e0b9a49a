//! LLM provider configuration

use serde::{Deserialize, Serialize};

/// Chat-completion provider settings
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Model name
    ///
    /// Examples: "gpt-4o-mini", "gpt-4o"
    #[serde(default = "default_model")]
    pub model: String,

    /// API access key
    ///
    /// Never written back out. Usually supplied through `OPENAI_API_KEY`
    /// or `SENTINEL_LLM_API_KEY` rather than a checked-in file.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Outbound HTTP proxy, e.g. `http://127.0.0.1:7890`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Request timeout in seconds; 0 disables the timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature; provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            api_base: default_api_base(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl crate::validation::Validate for LlmConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_http_url, validate_range};

        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid(
                "llm.model",
                "Model name cannot be empty",
            ));
        }

        validate_http_url("llm.api_base", &self.api_base)?;

        if let Some(proxy) = &self.proxy {
            validate_http_url("llm.proxy", proxy)?;
        }

        if let Some(temperature) = self.temperature {
            validate_range("llm.temperature", temperature, 0.0, 2.0)?;
        }

        // The key is checked when the client is built; a config without one
        // is still valid for dry runs.
        Ok(())
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}
