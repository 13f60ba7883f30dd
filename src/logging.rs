//! Structured logging setup
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! `~/.dict-tui/logs/dict-tui.log`. Filtering respects `RUST_LOG` and falls
//! back to the configured filter.

use crate::config::Config;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory holding the log files
pub fn logs_dir() -> Option<PathBuf> {
    Config::config_dir().map(|dir| dir.join("logs"))
}

/// Build the filter: `RUST_LOG` wins over the configured default
fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the file subscriber
///
/// The returned guard flushes buffered lines on drop and must be held until
/// the application exits.
pub fn init(default_filter: &str) -> Result<Option<WorkerGuard>> {
    let Some(dir) = logs_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::daily(&dir, "dict-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(file_layer)
        .try_init()?;

    Ok(Some(guard))
}
