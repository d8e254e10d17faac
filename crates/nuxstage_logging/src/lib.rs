//! Shared logging setup for Nuxstage binaries.
//!
//! Staging runs are short-lived batch jobs, but their logs outlive them:
//! when a staged application misbehaves the staging log is the first place
//! to look. Every run therefore writes to a daily-rolling file under the
//! Nuxstage home directory in addition to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "nuxstage=info,nuxstage_protocol=info";

/// Logging configuration for a Nuxstage binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Mirror the file-level filter to stderr instead of warnings only.
    pub verbose: bool,
}

/// Resolve the Nuxstage home directory.
///
/// Priority:
/// 1) NUXSTAGE_HOME
/// 2) HOME/USERPROFILE
/// 3) ./.nuxstage
pub fn nuxstage_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("NUXSTAGE_HOME") {
        return PathBuf::from(override_path);
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(".nuxstage");
    }
    PathBuf::from(".").join(".nuxstage")
}

/// Logs directory: `<home>/logs`
pub fn logs_dir() -> PathBuf {
    nuxstage_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

/// Initialize tracing with a daily-rolling file writer and stderr output.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the process.
pub fn init_logging(config: LogConfig<'_>) -> Result<WorkerGuard> {
    let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;

    let file_appender =
        tracing_appender::rolling::daily(log_dir, format!("{}.log", config.app_name));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_honors_override() {
        // Serialize env mutation within this test binary.
        let temp = tempfile::TempDir::new().unwrap();
        let previous = std::env::var("NUXSTAGE_HOME").ok();
        std::env::set_var("NUXSTAGE_HOME", temp.path());

        assert_eq!(nuxstage_home(), temp.path());
        assert_eq!(logs_dir(), temp.path().join("logs"));

        match previous {
            Some(value) => std::env::set_var("NUXSTAGE_HOME", value),
            None => std::env::remove_var("NUXSTAGE_HOME"),
        }
    }
}
