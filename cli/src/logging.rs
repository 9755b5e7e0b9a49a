use anyhow::{anyhow, Context, Result};
use sentinel_config::{LogLevel, LoggingConfig};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CRATE_TARGETS: [&str; 3] = ["sentinel", "sentinel_core", "sentinel_config"];

/// Install the global subscriber: stderr at the configured level (or
/// `RUST_LOG`), plus a debug-level file when enabled.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let console_level = if verbose { LogLevel::Debug } else { config.level };
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(console_level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let file_layer = if config.file_enabled {
        let file = open_log_file(&config.file, config.max_file_bytes)?;
        Some(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_filter(EnvFilter::new(directives(LogLevel::Debug))),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

/// Our crates at `level`, everything else at warn.
fn directives(level: LogLevel) -> String {
    let mut parts = vec!["warn".to_string()];
    parts.extend(CRATE_TARGETS.iter().map(|t| format!("{}={}", t, level)));
    parts.join(",")
}

fn open_log_file(path: &Path, max_bytes: u64) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    rotate_if_needed(path, max_bytes)
        .with_context(|| format!("Failed to rotate log file {}", path.display()))?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Move `path` to `<path>.1` once it is larger than `max_bytes`.
fn rotate_if_needed(path: &Path, max_bytes: u64) -> std::io::Result<()> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if size <= max_bytes {
        return Ok(());
    }

    let rotated = rotated_path(path);
    if rotated.exists() {
        fs::remove_file(&rotated)?;
    }
    fs::rename(path, rotated)
}

fn rotated_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".1");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_scope_level_to_our_crates() {
        assert_eq!(
            directives(LogLevel::Debug),
            "warn,sentinel=debug,sentinel_core=debug,sentinel_config=debug"
        );
    }

    #[test]
    fn oversized_log_is_rotated() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("llm_logs.log");
        fs::write(&log, vec![b'x'; 64]).unwrap();
        fs::write(rotated_path(&log), "older").unwrap();

        rotate_if_needed(&log, 32).unwrap();

        assert!(!log.exists());
        assert_eq!(fs::read(rotated_path(&log)).unwrap().len(), 64);
    }

    #[test]
    fn small_or_missing_log_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("llm_logs.log");

        rotate_if_needed(&log, 32).unwrap();
        assert!(!log.exists());

        fs::write(&log, "short").unwrap();
        rotate_if_needed(&log, 32).unwrap();
        assert_eq!(fs::read_to_string(&log).unwrap(), "short");
        assert!(!rotated_path(&log).exists());
    }

    #[test]
    fn open_log_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("daily_progress").join("llm_logs.log");

        open_log_file(&log, 1024).unwrap();
        assert!(log.exists());
    }
}
