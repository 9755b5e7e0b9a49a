use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Failures surfaced by report generation
///
/// Nothing is retried or recovered locally; every variant reaches the caller.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing or invalid credentials, model, proxy or client setup.
    /// Only produced while constructing a client.
    #[error("invalid configuration: {field}: {message}")]
    Configuration { field: String, message: String },

    /// The request never got a response (connect, proxy, timeout)
    #[error("transport error while calling the LLM API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with an error or a payload we cannot use
    #[error("LLM API error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    RemoteApi {
        status: Option<u16>,
        message: String,
    },

    /// The dry-run prompt could not be written
    #[error("failed to write prompt to {}: {source}", .path.display())]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub(crate) fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            status,
            message: message.into(),
        }
    }
}
