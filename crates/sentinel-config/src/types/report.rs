//! Report generation settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Where dry runs write the assembled prompt (overwritten each time)
    #[serde(default = "default_prompt_path")]
    pub prompt_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prompt_path: default_prompt_path(),
        }
    }
}

impl crate::validation::Validate for ReportConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.prompt_path.as_os_str().is_empty() {
            return Err(crate::error::ConfigError::invalid(
                "report.prompt_path",
                "Prompt path cannot be empty",
            ));
        }
        Ok(())
    }
}

fn default_prompt_path() -> PathBuf {
    PathBuf::from("daily_progress/prompt.txt")
}
