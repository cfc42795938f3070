//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FadeError, Result};
use crate::fade_dirs;

/// Top-level configuration for nightfade.
///
/// Loaded from `config.toml` under [`fade_dirs::config_dir`]. Every field
/// has a default, so a missing or partial file is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explicit path to the nightlight binary. When set, discovery is
    /// skipped entirely and generated job scripts use this path verbatim.
    pub nightlight_path: Option<PathBuf>,
    /// Play a sound when a scheduled warmth change fires.
    pub play_sound: bool,
    /// System sound played by the job, by name under `/System/Library/Sounds`.
    pub sound_name: String,
    /// Show a notification when a scheduled warmth change fires.
    pub show_notification: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nightlight_path: None,
            play_sound: true,
            sound_name: "Submarine".to_owned(),
            show_notification: true,
        }
    }
}

impl AppConfig {
    /// Load the config from the default location, falling back to defaults
    /// when the file is missing or unreadable.
    #[must_use]
    pub fn load() -> Self {
        let path = fade_dirs::config_file();
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config ({e})");
                Self::default()
            }
        }
    }

    /// Parse a config file at an explicit path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| FadeError::Config(e.to_string()))
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| FadeError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
