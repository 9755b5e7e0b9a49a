//! Progress report generation on top of an OpenAI-compatible chat API.
//!
//! ```no_run
//! use sentinel_config::Config;
//! use sentinel_core::ReportGenerator;
//!
//! let config = Config::load()?;
//! let generator = ReportGenerator::new(&config.llm, &config.report)?;
//! let report = generator.generate_daily_report("## Commits\n- ...", false)?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod llm;
pub mod prompts;
pub mod report;

pub use error::{ReportError, Result};
pub use llm::{ChatClient, ChatMessage, OpenAiClient, Role};
pub use report::{ReportGenerator, DRY_RUN_SENTINEL};
