use crate::error::{ReportError, Result};
use reqwest::blocking::Client;
use url::Url;
use sentinel_config::validation::parse_http_url;
use sentinel_config::LlmConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single blocking chat-completion exchange.
pub trait ChatClient: Send + Sync {
    /// Send `messages` in order and return the first completion's text.
    fn chat(&self, messages: &[ChatMessage]) -> Result<String>;
}

impl<T: ChatClient + ?Sized> ChatClient for std::sync::Arc<T> {
    fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).chat(messages)
    }
}

/// OpenAI-compatible `/chat/completions` client.
///
/// Holds one connection pool for the life of the process.
pub struct OpenAiClient {
    api_key: String,
    model: String,
    endpoint: Url,
    temperature: Option<f32>,
    client: Client,
}

impl OpenAiClient {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        let api_key = match cfg.api_key.as_deref() {
            None | Some("") => {
                return Err(ReportError::configuration(
                    "llm.api_key",
                    "API key is not set (use OPENAI_API_KEY or SENTINEL_LLM_API_KEY)",
                ))
            }
            Some(key) if key.chars().any(|c| c.is_whitespace() || c.is_control()) => {
                return Err(ReportError::configuration(
                    "llm.api_key",
                    "API key contains whitespace or control characters",
                ))
            }
            Some(key) => key.to_string(),
        };

        if cfg.model.trim().is_empty() {
            return Err(ReportError::configuration(
                "llm.model",
                "Model name cannot be empty",
            ));
        }

        let endpoint = chat_endpoint(&cfg.api_base)?;

        let mut builder = Client::builder();
        builder = match cfg.proxy.as_deref() {
            Some(proxy) => {
                parse_http_url("llm.proxy", proxy)
                    .map_err(|e| ReportError::configuration("llm.proxy", e.to_string()))?;
                let proxy = reqwest::Proxy::all(proxy)
                    .map_err(|e| ReportError::configuration("llm.proxy", e.to_string()))?;
                builder.proxy(proxy)
            }
            // Only the configured proxy applies; ambient proxy variables are
            // already folded into the config by the loader.
            None => builder.no_proxy(),
        };

        let timeout = (cfg.timeout_secs > 0).then(|| Duration::from_secs(cfg.timeout_secs));
        let client = builder
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::configuration("llm", format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model: cfg.model.clone(),
            endpoint,
            temperature: cfg.temperature,
            client,
        })
    }
}

/// `{api_base}/chat/completions`, keeping any path prefix of the base
fn chat_endpoint(api_base: &str) -> Result<Url> {
    let to_err = |message: String| ReportError::configuration("llm.api_base", message);

    let mut base = parse_http_url("llm.api_base", api_base).map_err(|e| to_err(e.to_string()))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("chat/completions")
        .map_err(|e| to_err(format!("cannot build endpoint from '{}': {}", api_base, e)))
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatClient for OpenAiClient {
    fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(ReportError::Transport)?;

        let status = resp.status();
        let text = resp.text().map_err(ReportError::Transport)?;
        debug!(status = status.as_u16(), body = %text, "LLM raw response");

        if !status.is_success() {
            return Err(ReportError::remote(Some(status.as_u16()), text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            ReportError::remote(Some(status.as_u16()), format!("malformed response: {e}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(ReportError::remote(
                Some(status.as_u16()),
                format!("API returned error: {error}"),
            ));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ReportError::remote(
                    Some(status.as_u16()),
                    "malformed response: missing content in choices",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = OpenAiClient::from_config(&config_with_key(None)).err().unwrap();
        assert!(matches!(err, ReportError::Configuration { ref field, .. } if field == "llm.api_key"));
    }

    #[test]
    fn empty_key_is_configuration_error() {
        let err = OpenAiClient::from_config(&config_with_key(Some(""))).err().unwrap();
        assert!(matches!(err, ReportError::Configuration { .. }));
    }

    #[test]
    fn malformed_key_is_configuration_error() {
        let err = OpenAiClient::from_config(&config_with_key(Some("sk-abc\n")))
            .err()
            .unwrap();
        assert!(matches!(err, ReportError::Configuration { .. }));
    }

    #[test]
    fn bad_proxy_is_configuration_error() {
        let cfg = LlmConfig {
            proxy: Some("proxy.local:3128".to_string()),
            ..config_with_key(Some("sk-test"))
        };
        let err = OpenAiClient::from_config(&cfg).err().unwrap();
        assert!(matches!(err, ReportError::Configuration { ref field, .. } if field == "llm.proxy"));
    }

    #[test]
    fn valid_config_builds_client() {
        let cfg = LlmConfig {
            proxy: Some("http://127.0.0.1:7890".to_string()),
            timeout_secs: 0,
            ..config_with_key(Some("sk-test"))
        };
        let client = OpenAiClient::from_config(&cfg).unwrap();
        assert_eq!(client.model, "gpt-4o-mini");
        assert_eq!(client.endpoint.as_str(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        for (base, expected) in [
            ("http://127.0.0.1:1234", "http://127.0.0.1:1234/chat/completions"),
            ("http://localhost:11434/v1/", "http://localhost:11434/v1/chat/completions"),
            ("https://gateway.example.com/openai/v1", "https://gateway.example.com/openai/v1/chat/completions"),
        ] {
            assert_eq!(chat_endpoint(base).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn malformed_api_base_is_configuration_error() {
        for base in ["http://bad host:notaport/v1", "api.openai.com/v1", "https://"] {
            let cfg = LlmConfig {
                api_base: base.to_string(),
                ..config_with_key(Some("sk-test"))
            };
            let err = OpenAiClient::from_config(&cfg).err().unwrap();
            assert!(
                matches!(err, ReportError::Configuration { ref field, .. } if field == "llm.api_base"),
                "{base}: {err:?}"
            );
        }
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let value = serde_json::to_value([ChatMessage::system("s"), ChatMessage::user("u")]).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "role": "system", "content": "s" },
                { "role": "user", "content": "u" }
            ])
        );
    }
}
