//! Application Configuration
//!
//! Handles loading and saving application configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl AppConfig {
    /// Directory holding the executable, falling back to the working directory
    fn exe_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::exe_dir().join("config.toml")
    }

    /// Get the settings store path
    pub fn data_path(&self) -> PathBuf {
        Self::exe_dir().join(&self.general.data_file)
    }

    /// Load configuration from file or create default
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, writing defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_locale() -> String {
    "es-ES".to_string()
}

fn default_data_file() -> String {
    "settings.json".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            data_file: default_data_file(),
        }
    }
}

/// Which speech backend to wire in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// Line-based console adapter
    Console,
    /// No service available on this platform
    None,
}

fn default_backend() -> SpeechBackend {
    SpeechBackend::Console
}

/// Voice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_backend")]
    pub recognizer: SpeechBackend,
    #[serde(default = "default_backend")]
    pub synthesizer: SpeechBackend,
    /// Used only until the device has stored its own choice
    #[serde(default)]
    pub enabled_by_default: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            recognizer: default_backend(),
            synthesizer: default_backend(),
            enabled_by_default: false,
        }
    }
}
