//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/clearcode/config.yaml`. Every field
//! has a default, so partial files are fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::history::DEFAULT_HISTORY_LIMIT;
use crate::scheduler::{TaskKey, MAX_DELAY};

/// Debounce delays in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub highlight_ms: u64,
    pub line_numbers_ms: u64,
    pub history_ms: u64,
    pub auto_save_ms: u64,
    pub status_clear_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            highlight_ms: 150,
            line_numbers_ms: 100,
            history_ms: 500,
            auto_save_ms: 2000,
            status_clear_ms: 3000,
        }
    }
}

impl DelayConfig {
    /// Delay for one of the debounced tasks, capped at [`MAX_DELAY`]
    pub fn for_task(&self, key: TaskKey) -> Duration {
        let ms = match key {
            TaskKey::Highlight => self.highlight_ms,
            TaskKey::LineNumbers => self.line_numbers_ms,
            TaskKey::HistorySnapshot => self.history_ms,
            TaskKey::AutoSave => self.auto_save_ms,
            TaskKey::StatusClear => self.status_clear_ms,
        };
        Duration::from_millis(ms).min(MAX_DELAY)
    }
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Show the highlight overlay
    #[serde(default = "default_true")]
    pub syntax_enabled: bool,
    /// Write the workspace after edits settle
    #[serde(default = "default_true")]
    pub auto_save: bool,
    /// Snapshots kept per document
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub delays: DelayConfig,
}

fn default_true() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            syntax_enabled: true,
            auto_save: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            delays: DelayConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
