//! Errors raised while loading, layering and validating configuration

pub mod format;

use crate::loader::ConfigFormat;
use std::path::PathBuf;
use thiserror::Error;

pub use format::ErrorFormatter;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration file at {path}")]
    FileNotFound { path: PathBuf },

    #[error("Cannot tell the format of {path} (use .toml, .yml, .yaml or .json)")]
    UnknownFormat { path: PathBuf },

    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config document failed to parse; `excerpt` shows the offending lines
    #[error("Invalid {format} in {origin}: {message}\n{excerpt}")]
    Parse {
        format: ConfigFormat,
        origin: String,
        message: String,
        excerpt: String,
    },

    #[error("Invalid value '{value}' for {field}\n  Valid options: {options}\n  Hint: {hint}")]
    InvalidEnum {
        field: String,
        value: String,
        options: String,
        hint: String,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Environment variable {var} is unusable: {message}")]
    EnvVar { var: String, message: String },

    #[error("Invalid {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn env_var(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EnvVar {
            var: var.into(),
            message: message.into(),
        }
    }

    /// `value` is not one of `options`; the hint names the closest option
    pub fn invalid_enum(
        field: impl Into<String>,
        value: impl Into<String>,
        options: &[&str],
    ) -> Self {
        let value = value.into();
        let hint = match closest_option(&value, options) {
            Some(option) => format!("Did you mean '{}'?", option),
            None => format!("Use one of: {}", options.join(", ")),
        };
        Self::InvalidEnum {
            field: field.into(),
            value,
            options: options.join(", "),
            hint,
        }
    }

    /// Parse failure at a 1-based `line` (and optional column) of `content`
    pub fn parse(
        format: ConfigFormat,
        path: Option<&str>,
        message: impl Into<String>,
        content: &str,
        line: Option<usize>,
        column: Option<usize>,
    ) -> Self {
        Self::Parse {
            format,
            origin: path.unwrap_or("<inline>").to_string(),
            message: message.into(),
            excerpt: line
                .map(|line| excerpt(content, line, column))
                .unwrap_or_default(),
        }
    }
}

/// Closest option by edit distance, if it is close enough to be a typo.
fn closest_option<'a>(value: &str, options: &[&'a str]) -> Option<&'a str> {
    let value = value.to_lowercase();
    options
        .iter()
        .map(|option| (*option, edit_distance(&value, option)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(option, _)| option)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}

/// The line before, the offending line and the line after, numbered.
fn excerpt(content: &str, line: usize, column: Option<usize>) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if line == 0 || line > lines.len() {
        return String::new();
    }

    let mut out = Vec::new();
    for number in line.saturating_sub(1).max(1)..=(line + 1).min(lines.len()) {
        let text = lines[number - 1];
        if number == line {
            out.push(format!("→ {:3} | {}", number, text));
            if let Some(column) = column.filter(|c| *c > 0) {
                out.push(format!("{:>width$}", "^", width = column + 8));
            }
        } else {
            out.push(format!("  {:3} | {}", number, text));
        }
    }
    out.join("\n")
}
