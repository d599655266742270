//! Configuration loading for Daybook.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.daybook/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DaybookError, Result};
use crate::stats::DEFAULT_TOP_TAGS;

/// Main configuration struct for Daybook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where entries are stored.
    pub storage: StorageConfig,
    /// Statistics view settings.
    pub stats: StatsConfig,
    /// Journal entry rules.
    pub journal: JournalConfig,
}

/// Storage location configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `journal-entries.json` and `mood-entries.json`.
    /// Defaults to `<daybook_home>/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Statistics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    /// How many tags the stats view lists.
    pub top_tags: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_tags: DEFAULT_TOP_TAGS,
        }
    }
}

/// Journal entry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    /// Refuse to save journal entries whose content is blank.
    pub require_content: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            require_content: true,
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        config.apply_env_overrides();
        config
    }

    /// Load user config from `<daybook_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| DaybookError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| DaybookError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // DAYBOOK_DATA_DIR
        if let Ok(val) = env::var("DAYBOOK_DATA_DIR") {
            if val.is_empty() {
                eprintln!("Warning: DAYBOOK_DATA_DIR is empty. Using configured data directory.");
            } else {
                self.storage.data_dir = Some(PathBuf::from(val));
            }
        }

        // DAYBOOK_TOP_TAGS
        if let Ok(val) = env::var("DAYBOOK_TOP_TAGS") {
            match val.parse::<usize>() {
                Ok(n) => self.stats.top_tags = n,
                Err(_) => eprintln!(
                    "Warning: Invalid DAYBOOK_TOP_TAGS value '{}'. \
                    Expected a non-negative integer. Using '{}'.",
                    val, self.stats.top_tags
                ),
            }
        }

        // DAYBOOK_REQUIRE_CONTENT
        if let Ok(val) = env::var("DAYBOOK_REQUIRE_CONTENT") {
            self.journal.require_content = val == "true" || val == "1";
        }
    }

    /// Merge another config into this one.
    ///
    /// Non-default fields from `other` win. A layer cannot reset a value to
    /// its default once a lower layer changed it.
    fn merge(mut self, other: Config) -> Self {
        if other.storage.data_dir.is_some() {
            self.storage.data_dir = other.storage.data_dir;
        }

        if other.stats.top_tags != StatsConfig::default().top_tags {
            self.stats.top_tags = other.stats.top_tags;
        }

        if other.journal.require_content != JournalConfig::default().require_content {
            self.journal.require_content = other.journal.require_content;
        }

        self
    }

    /// Directory the file store should use.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.clone().or_else(data_dir)
    }

    /// Write this config to `path`, creating parent directories.
    ///
    /// Uses atomic write (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| DaybookError::storage(parent, e))?;
            }
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| DaybookError::config(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, &content).map_err(|e| DaybookError::storage(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| DaybookError::storage(path, e))?;

        Ok(())
    }
}

/// Get the Daybook home directory.
///
/// Checks `DAYBOOK_HOME` first, then falls back to `~/.daybook`.
/// An empty `DAYBOOK_HOME` is ignored.
pub fn daybook_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("DAYBOOK_HOME") {
        if home.is_empty() {
            tracing::warn!("DAYBOOK_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("DAYBOOK_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".daybook"));
    }

    // Containerized/minimal environments without HOME
    let fallback = env::temp_dir().join("daybook");
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback.display()
    );
    Some(fallback)
}

/// Returns `<daybook_home>/data/`.
pub fn data_dir() -> Option<PathBuf> {
    daybook_home().map(|h| h.join("data"))
}

/// Returns `<daybook_home>/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    daybook_home().map(|h| h.join("config.toml"))
}
