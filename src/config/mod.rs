//! Configuration management for branchline

mod keys;

pub use keys::{Action, ActionGroup, KeyBindings, key_to_string};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::Translations;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Command rendering a remote branch's history; `{{branchName}}` is
    /// replaced by the branch's full name
    #[serde(default = "default_branch_log_cmd")]
    pub branch_log_cmd: String,

    /// Poll interval in milliseconds for the event loop
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Overrides for user-facing strings, keyed like the built-in table
    #[serde(default)]
    pub strings: HashMap<String, String>,

    /// Keybindings configuration
    #[serde(default)]
    pub keys: KeyBindings,
}

fn default_branch_log_cmd() -> String {
    "git log --graph --color=always --abbrev-commit --decorate --date=relative \
     --pretty=medium {{branchName}} --"
        .to_string()
}

const fn default_poll_interval() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch_log_cmd: default_branch_log_cmd(),
            poll_interval_ms: default_poll_interval(),
            strings: HashMap::new(),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        // Ensure any new default keybindings are available
        config.keys.merge_defaults();
        Ok(config)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        crate::paths::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("branchline")
            .join("config.json")
    }

    /// The English string table with this config's overrides applied
    #[must_use]
    pub fn translations(&self) -> Translations {
        Translations::english().with_overrides(&self.strings)
    }
}
