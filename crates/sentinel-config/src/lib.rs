//! Configuration management for sentinel
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Layered loading (file + environment + explicit overrides) with per-key provenance
//! - Type-safe configuration structs
//!
//! # Example
//!
//! ```no_run
//! use sentinel_config::Config;
//!
//! // Load from default location (.sentinel.{toml,yml,yaml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! let model = &config.llm.model;
//! let prompt_path = &config.report.prompt_path;
//! # Ok::<(), sentinel_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::{ConfigBuilder, ConfigLayerSource, ConfigLayerStack};
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
