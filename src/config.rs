//! Grid editor configuration
//!
//! Construction-time options, optionally loaded from
//! `~/.config/gridpad/config.yaml`. Unknown keys are ignored and missing keys
//! take their defaults, so a partial file is fine.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Editor options recognized at construction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Show the row-number gutter
    pub show_row_numbers: bool,
    /// Show the per-column operation menu
    pub show_column_menu: bool,
    /// Show the per-row operation menu
    pub show_row_menu: bool,
    /// Fixed row height in pixels
    pub row_height: u32,
    /// Fixed column width in pixels
    pub column_width: u32,
    /// Accepted for hosts that pass it; columns keep the fixed width
    pub resizable_columns: bool,
    /// Accepted for hosts that pass it; no drag-reorder is implemented
    pub reorderable_columns: bool,
    /// Number of undo snapshots kept
    pub history_limit: usize,
    /// Hold time before a press turns into a drag
    pub long_press_ms: u64,
    /// Trailing-edge debounce for drag pointer moves
    pub drag_debounce_ms: u64,
    /// Delay before a released Shift ends the shift session
    pub shift_grace_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            show_column_menu: true,
            show_row_menu: true,
            row_height: 32,
            column_width: 150,
            resizable_columns: false,
            reorderable_columns: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
            long_press_ms: 200,
            drag_debounce_ms: 16,
            shift_grace_ms: 1500,
        }
    }
}

/// Errors from reading or writing the config file
#[derive(Debug)]
pub enum ConfigError {
    NoConfigDir,
    Io(std::io::Error),
    Parse(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "No config directory available"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GridConfig {
    /// Load config from the user config dir, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from YAML text
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Write config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Write config to the user config dir
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn drag_debounce(&self) -> Duration {
        Duration::from_millis(self.drag_debounce_ms)
    }

    pub fn shift_grace(&self) -> Duration {
        Duration::from_millis(self.shift_grace_ms)
    }
}
