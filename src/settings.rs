//! Persisted hosts-table column preferences.
//!
//! The hosts table shows a subset of its columns by default; which ones a
//! user hides persists across sessions. Stored as JSON under the platform
//! config directory.

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Columns hidden unless the user opts in.
pub const DEFAULT_HIDDEN_COLUMNS: &[&str] = &[
    "device_mapping",
    "primary_mac",
    "public_ip",
    "cpu_type",
    "memory",
    "uptime",
    "uuid",
    "seen_time",
    "hardware_model",
    "hardware_serial",
];

/// Column preferences that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPreferences {
    /// Column ids hidden from the hosts table.
    pub hidden_columns: Vec<String>,
}

impl Default for ColumnPreferences {
    fn default() -> Self {
        Self {
            hidden_columns: DEFAULT_HIDDEN_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ColumnPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hosts-console").join("columns.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .map_or_else(Self::default, |p| Self::load_from(&p))
    }

    /// Load preferences from a specific file, or return defaults.
    ///
    /// A missing file is the normal first-run case and loads silently; a
    /// file that exists but does not decode is noted and ignored.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed column settings");
                Self::default()
            }
        }
    }

    /// Save preferences to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save preferences to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConsoleError::io(path, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConsoleError::config(format!("couldn't encode column settings: {e}")))?;
        std::fs::write(path, json).map_err(|e| ConsoleError::io(path, e))
    }

    pub fn is_hidden(&self, column: &str) -> bool {
        self.hidden_columns.iter().any(|c| c == column)
    }

    /// Hide a column (no-op if already hidden).
    pub fn hide(&mut self, column: &str) {
        if !self.is_hidden(column) {
            self.hidden_columns.push(column.to_string());
        }
    }

    /// Show a column again (no-op if not hidden).
    pub fn unhide(&mut self, column: &str) {
        self.hidden_columns.retain(|c| c != column);
    }

    /// Restore the default hidden set.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
