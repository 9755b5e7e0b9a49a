//! Configuration type definitions
//!
//! Each section is self-contained with validation and sensible defaults.

pub mod llm;
pub mod logging;
pub mod report;

pub use llm::LlmConfig;
pub use logging::{LogLevel, LoggingConfig};
pub use report::ReportConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration, organized by functional area
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Chat-completion provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Report generation settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging sinks and verbosity
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.llm.validate()?;
        self.report.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}
