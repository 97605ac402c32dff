//! Configuration module for vsgraph
//!
//! This module handles:
//! - Tool configuration (`config.toml`): logging and output preferences
//! - Project files (`.json`): the serialized node graph, see [`ProjectFile`]
//!
//! # Config Location
//!
//! Without an explicit `--config`, the tool reads the platform config directory:
//! - **Linux**: `~/.config/dev.vsgraph/config.toml`
//! - **macOS**: `~/Library/Application Support/dev.vsgraph/config.toml`
//! - **Windows**: `%APPDATA%\dev.vsgraph\config.toml`
//!
//! A missing file at the default location means "use defaults".
//!
//! # Example
//!
//! ```toml
//! log_filter = "info,vsgraph=trace"
//! log_dir = "/var/log/vsgraph"
//! script_extension = "vpy"
//! overwrite = false
//! ```

pub mod project;

pub use project::{ConnectionDef, ProjectFile, PROJECT_FILE_VERSION};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.vsgraph";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default extension for written scripts
pub const DEFAULT_SCRIPT_EXTENSION: &str = "vpy";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "info,vsgraph=debug";

/// Get the application config directory path
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    app_config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tracing filter directive, e.g. `"warn,vsgraph=info"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    /// Directory for daily-rolling log files; console only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Extension used when writing a script next to its project file
    pub script_extension: String,

    /// Whether existing script files may be replaced
    pub overwrite: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            log_dir: None,
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            overwrite: false,
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml(&content)
            .map_err(|e| e.with_context(format!("Failed to parse config file {:?}", path)))
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults if the file is absent
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        };
        loaded.unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Tracing filter to use, in order: `RUST_LOG` is handled by the caller,
    /// then the configured filter, then [`DEFAULT_LOG_FILTER`].
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Where the script for `project` goes when written beside it.
    pub fn script_path_for(&self, project: &Path) -> PathBuf {
        project.with_extension(&self.script_extension)
    }

    fn check(&self) -> Result<()> {
        let ext = self.script_extension.as_str();
        if ext.is_empty() || ext.contains(['/', '\\', '.']) {
            return Err(Error::Config(format!(
                "script_extension must be a bare extension, got {:?}",
                ext
            )));
        }
        Ok(())
    }
}
