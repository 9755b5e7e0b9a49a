//! Logging configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Logging sinks and verbosity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Console log level; `RUST_LOG` overrides it when set
    #[serde(default)]
    pub level: LogLevel,

    /// Write a debug-level log file in addition to the console
    #[serde(default = "default_file_enabled")]
    pub file_enabled: bool,

    /// Path of the debug-level log file
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// The log file is rotated at startup once it grows past this size
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const NAMES: [&'static str; 5] = ["error", "warn", "info", "debug", "trace"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> crate::error::Result<Self> {
        match value.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(crate::error::ConfigError::invalid_enum(
                "logging.level",
                value,
                &Self::NAMES,
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            file_enabled: default_file_enabled(),
            file: default_file(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl crate::validation::Validate for LoggingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.max_file_bytes == 0 {
            return Err(ConfigError::invalid(
                "logging.max_file_bytes",
                "max_file_bytes must be > 0",
            ));
        }

        if self.file_enabled && self.file.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "logging.file",
                "Log file path cannot be empty (set file_enabled = false to disable file logging)",
            ));
        }

        Ok(())
    }
}

fn default_file_enabled() -> bool {
    true
}

fn default_file() -> PathBuf {
    PathBuf::from("daily_progress/llm_logs.log")
}

fn default_max_file_bytes() -> u64 {
    1024 * 1024
}
