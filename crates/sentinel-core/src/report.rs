//! Daily progress report generation.

use crate::error::{ReportError, Result};
use crate::llm::{ChatClient, ChatMessage, OpenAiClient};
use crate::prompts::{build_user_prompt, SYSTEM_PROMPT};
use sentinel_config::{LlmConfig, ReportConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Returned by a dry run instead of a generated report.
pub const DRY_RUN_SENTINEL: &str = "DRY RUN";

/// Turns project-activity markdown into a progress report.
///
/// The chat client is built once and reused for every call; calls share no
/// mutable state, so a generator can be used from several threads.
pub struct ReportGenerator<C = OpenAiClient> {
    client: C,
    prompt_path: PathBuf,
}

impl ReportGenerator<OpenAiClient> {
    /// Validates credentials and builds the HTTP client.
    ///
    /// Fails with [`ReportError::Configuration`] before any client exists
    /// when the key, model or proxy is missing or malformed.
    pub fn new(llm: &LlmConfig, report: &ReportConfig) -> Result<Self> {
        let client = OpenAiClient::from_config(llm)?;
        Ok(Self::with_client(client, report.prompt_path.clone()))
    }
}

impl<C: ChatClient> ReportGenerator<C> {
    pub fn with_client(client: C, prompt_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            prompt_path: prompt_path.into(),
        }
    }

    pub fn prompt_path(&self) -> &Path {
        &self.prompt_path
    }

    /// Generate a report for `activity_text`.
    ///
    /// With `dry_run` the user prompt is written to the prompt file and
    /// [`DRY_RUN_SENTINEL`] is returned without touching the network.
    /// Otherwise the model's first completion is returned verbatim.
    pub fn generate_daily_report(&self, activity_text: &str, dry_run: bool) -> Result<String> {
        let prompt = build_user_prompt(activity_text);

        let result = if dry_run {
            self.dry_run(&prompt)
        } else {
            self.live(prompt)
        };

        result.inspect_err(|e| {
            error!(error = ?e, "An error occurred while generating the report: {}", e);
        })
    }

    fn dry_run(&self, prompt: &str) -> Result<String> {
        info!("Dry run mode enabled. Saving prompt to file.");
        self.save_prompt(prompt)?;
        debug!(path = %self.prompt_path.display(), "Prompt saved");
        Ok(DRY_RUN_SENTINEL.to_string())
    }

    fn live(&self, prompt: String) -> Result<String> {
        info!("Starting report generation using LLM.");

        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];
        let report = self.client.chat(&messages)?;
        debug!(response = %report, "LLM response");
        Ok(report)
    }

    fn save_prompt(&self, prompt: &str) -> Result<()> {
        let to_err = |source: std::io::Error| ReportError::PromptFile {
            path: self.prompt_path.clone(),
            source,
        };

        if let Some(parent) = self.prompt_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_err)?;
        }
        fs::write(&self.prompt_path, prompt).map_err(to_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::prompts::USER_INSTRUCTION;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every request and answers with a canned result.
    struct FakeClient {
        calls: AtomicUsize,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
        reply: fn() -> Result<String>,
    }

    impl FakeClient {
        fn new(reply: fn() -> Result<String>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ChatClient for FakeClient {
        fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(messages.to_vec());
            (self.reply)()
        }
    }

    fn generator(reply: fn() -> Result<String>) -> (tempfile::TempDir, ReportGenerator<FakeClient>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily_progress").join("prompt.txt");
        (dir, ReportGenerator::with_client(FakeClient::new(reply), path))
    }

    #[test]
    fn dry_run_returns_sentinel_without_calling_client() {
        let (_dir, reporter) = generator(|| Ok("unused".to_string()));

        for text in ["", "# Project\n## Commits\n- a", "plain"] {
            assert_eq!(reporter.generate_daily_report(text, true).unwrap(), DRY_RUN_SENTINEL);
        }
        assert_eq!(reporter.client.calls(), 0);
    }

    #[test]
    fn dry_run_overwrites_prompt_file() {
        let (_dir, reporter) = generator(|| Ok("unused".to_string()));

        reporter
            .generate_daily_report("a much longer first activity log", true)
            .unwrap();
        reporter.generate_daily_report("short", true).unwrap();

        let saved = fs::read_to_string(reporter.prompt_path()).unwrap();
        assert_eq!(saved, format!("{USER_INSTRUCTION}short"));

        reporter.generate_daily_report("short", true).unwrap();
        assert_eq!(fs::read_to_string(reporter.prompt_path()).unwrap(), saved);
    }

    #[test]
    fn dry_run_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // The prompt path is an existing directory, so the write must fail.
        let reporter = ReportGenerator::with_client(FakeClient::new(|| Ok(String::new())), dir.path());

        let err = reporter.generate_daily_report("x", true).unwrap_err();
        match err {
            ReportError::PromptFile { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected PromptFile error, got {other:?}"),
        }
        assert_eq!(reporter.client.calls(), 0);
    }

    #[test]
    fn live_call_sends_system_then_user() {
        let (_dir, reporter) = generator(|| Ok("report".to_string()));
        let text = "## Issues\n# heading-like line\n##";

        reporter.generate_daily_report(text, false).unwrap();

        let seen = reporter.client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let messages = &seen[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, format!("{USER_INSTRUCTION}{text}"));
    }

    #[test]
    fn live_call_returns_completion_verbatim() {
        let (_dir, reporter) = generator(|| Ok("  # Report\n\n- item  \n".to_string()));
        assert_eq!(
            reporter.generate_daily_report("", false).unwrap(),
            "  # Report\n\n- item  \n"
        );
        assert!(!reporter.prompt_path().exists());
    }

    #[test]
    fn live_call_propagates_errors() {
        let (_dir, reporter) = generator(|| Err(ReportError::remote(Some(500), "boom")));
        let err = reporter.generate_daily_report("text", false).unwrap_err();
        assert!(matches!(err, ReportError::RemoteApi { status: Some(500), .. }));
        assert_eq!(reporter.client.calls(), 1);
    }

    #[test]
    fn empty_key_fails_construction() {
        let llm = LlmConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        let result = ReportGenerator::new(&llm, &ReportConfig::default());
        assert!(matches!(result, Err(ReportError::Configuration { .. })));
    }
}
