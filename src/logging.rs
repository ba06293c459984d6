//! File-backed tracing setup. The terminal belongs to Ratatui while the app is
//! running, so log lines go to a daily rolling file under the data directory.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "library.log";

/// Install the global subscriber writing into `log_dir`.
///
/// The returned guard flushes buffered lines when dropped, so `main` keeps it
/// alive until the UI exits. Calling this more than once leaves the first
/// subscriber in place.
pub fn init(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level '{level}'"))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
        .with_context(|| format!("failed to open log directory '{}'", log_dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter);

    if tracing_subscriber::registry().with(file_layer).try_init().is_ok() {
        info!(dir = %log_dir.display(), "Logging initialized");
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_level() {
        let dir = std::env::temp_dir();
        assert!(init(&dir, "library=loud").is_err());
    }

    #[test]
    fn unusable_log_dir_is_an_error() {
        let file = std::env::temp_dir().join("ai-library-manager-not-a-dir");
        std::fs::write(&file, b"occupied").unwrap();

        let err = init(&file.join("logs"), "info").unwrap_err();
        assert!(err.to_string().starts_with("failed to open log directory"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        let dir = std::env::temp_dir().join("ai-library-manager-logs");
        let first = init(&dir, "debug");
        let second = init(&dir, "info");
        assert!(first.is_ok());
        assert!(second.is_ok());
    }
}
