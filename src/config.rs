//! Observation configuration and its persistence
//!
//! `ObservationConfig` is the single piece of durable state: the
//! watch-list plus the logging/echo switches. A `ConfigStore` persists
//! it so observation settings survive process restarts. The
//! `ObservationController` auto-loads on creation and saves after
//! every mutation.

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Durable observation settings
///
/// The watch list keeps insertion order and never holds duplicates.
/// An empty watch list means every conversation is observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationConfig {
    /// Conversation IDs under observation, in insertion order
    #[serde(default)]
    pub watch_list: Vec<String>,

    /// Whether in-scope messages are appended to the audit log
    #[serde(default = "default_true")]
    pub log_enabled: bool,

    /// Whether in-scope messages are echoed to the console
    #[serde(default = "default_true")]
    pub console_echo_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            watch_list: Vec::new(),
            log_enabled: true,
            console_echo_enabled: true,
        }
    }
}

/// Trait for persisting observation configuration
///
/// `load` is infallible by contract: every failure mode degrades to the
/// in-memory default configuration, reported via tracing. A malformed
/// persisted copy is left on disk untouched for forensic inspection.
pub trait ConfigStore: Send + Sync {
    /// Load the persisted configuration, or defaults when none exists
    ///
    /// When no persisted copy exists, the default configuration is
    /// written to storage (best effort) and returned.
    fn load(&self) -> ObservationConfig;

    /// Persist the full configuration, overwriting prior contents
    fn save(&self, config: &ObservationConfig) -> Result<()>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for std::sync::Arc<T> {
    fn load(&self) -> ObservationConfig {
        (**self).load()
    }

    fn save(&self, config: &ObservationConfig) -> Result<()> {
        (**self).save(config)
    }
}

/// JSON file-based configuration store
///
/// Persists the configuration as a pretty-printed, human-editable JSON
/// file. Atomic writes via temp file + rename to prevent corruption.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a new file config store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> ObservationConfig {
        if !self.path.exists() {
            let config = ObservationConfig::default();
            if let Err(e) = self.save(&config) {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to initialize config file, continuing with defaults"
                );
            }
            return config;
        }

        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read config file, falling back to defaults"
                );
                return ObservationConfig::default();
            }
        };

        match serde_json::from_str::<ObservationConfig>(&json) {
            Ok(config) => {
                tracing::debug!(
                    path = %self.path.display(),
                    watched = config.watch_list.len(),
                    "Config loaded"
                );
                config
            }
            Err(e) => {
                // Corrupted copy stays on disk for forensic inspection
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to parse config file, falling back to defaults"
                );
                ObservationConfig::default()
            }
        }
    }

    fn save(&self, config: &ObservationConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;

        // Atomic write: write to temp file, then rename
        let tmp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuditError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(&tmp_path, json).map_err(|e| {
            AuditError::Config(format!(
                "Failed to write config file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            AuditError::Config(format!(
                "Failed to rename config file {} → {}: {}",
                tmp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }
}

/// In-memory configuration store for testing
///
/// Stores the configuration in memory — lost on drop, but useful for
/// exercising the controller without touching real files.
#[derive(Default)]
pub struct MemoryConfigStore {
    config: std::sync::RwLock<Option<ObservationConfig>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> ObservationConfig {
        match self.config.read() {
            Ok(config) => config.clone().unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to acquire config lock, falling back to defaults");
                ObservationConfig::default()
            }
        }
    }

    fn save(&self, config: &ObservationConfig) -> Result<()> {
        let mut stored = self
            .config
            .write()
            .map_err(|e| AuditError::Config(format!("Failed to acquire config lock: {}", e)))?;
        *stored = Some(config.clone());
        Ok(())
    }
}
