//! Configuration system for blocknote.
//!
//! This module provides the configuration structure for blocknote with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use blocknote::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.theme, "default-dark");
//! assert_eq!(config.indent_size, 2);
//!
//! // Create custom configuration
//! let custom = Config {
//!     theme: "nord".to_string(),
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the blocknote application.
///
/// All fields have defaults, so a config file only needs the keys it changes.
///
/// # Fields
///
/// * `theme` - Color scheme name (default: "default-dark")
/// * `indent_size` - Columns of left padding per nesting level (default: 2)
/// * `auto_save` - Write the note file after every change (default: false)
/// * `create_backup` - Create .bak files before saving (default: false)
/// * `undo_limit` - Maximum number of undo steps to keep (default: 50)
/// * `enable_mouse` - Enable mouse wheel focus movement (default: true)
/// * `log_filter` - tracing filter used when RUST_LOG is unset (default: "blocknote=info")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Color scheme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Columns of left padding per nesting level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Write the note file after every change
    #[serde(default)]
    pub auto_save: bool,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Maximum number of undo steps to keep
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Enable mouse wheel focus movement
    #[serde(default = "default_enable_mouse")]
    pub enable_mouse: bool,

    /// Log filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_indent_size() -> usize {
    2
}

fn default_undo_limit() -> usize {
    50
}

fn default_enable_mouse() -> bool {
    true
}

fn default_log_filter() -> String {
    "blocknote=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            indent_size: default_indent_size(),
            auto_save: false,
            create_backup: false,
            undo_limit: default_undo_limit(),
            enable_mouse: default_enable_mouse(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/blocknote/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("blocknote");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
