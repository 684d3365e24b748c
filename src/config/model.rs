//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::error::ErrorPolicy;
use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub errors: ErrorConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Display strings for localized button labels, keyed by label key.
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
}

/// How failures inside async actions are reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorConfig {
    #[serde(default)]
    pub policy: ErrorPolicyKind,
}

/// Serializable subset of [`ErrorPolicy`]. Sinks can only be installed in
/// code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicyKind {
    #[default]
    Log,
    Discard,
    Propagate,
}

impl From<ErrorPolicyKind> for ErrorPolicy {
    fn from(kind: ErrorPolicyKind) -> Self {
        match kind {
            ErrorPolicyKind::Log => ErrorPolicy::Log,
            ErrorPolicyKind::Discard => ErrorPolicy::Discard,
            ErrorPolicyKind::Propagate => ErrorPolicy::Propagate,
        }
    }
}

/// Tokio runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
        }
    }
}

/// Diagnostic log settings. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            log_dir: default_log_dir(),
        }
    }
}

/// Demo UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_max_activity")]
    pub max_activity: usize,
}

impl UiConfig {
    /// Reject timestamp formats chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid timestamp_format {:?}", self.timestamp_format);
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            max_activity: default_max_activity(),
        }
    }
}

fn default_worker_threads() -> usize {
    2
}
fn default_true() -> bool {
    true
}
fn default_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/async-button/logs".to_string()
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_max_activity() -> usize {
    200
}
