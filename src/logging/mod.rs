//! Diagnostic logging.
//!
//! Events go to a daily rolling file under the configured log directory. A
//! full-screen terminal UI owns stdout and stderr, so nothing is printed.

use crate::config::{expand_home, LoggingConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive. Drop it last.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &std::path::Path {
        &self.log_dir
    }
}

/// Install the global subscriber. Returns `None` when logging is disabled
/// or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<Option<LoggingGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    let log_dir = expand_home(&config.log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "async-button.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return Ok(None);
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_dir,
    }))
}

/// Scope a bare level to this crate and the demo binary.
fn filter_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("async_button={level},async_button_demo={level}")
    }
}
