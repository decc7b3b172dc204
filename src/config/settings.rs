//! Application configuration

use anyhow::{Context, Result};
use minimal_timer_render::ClockFaceConfig;
use minimal_timer_types::{AlertSoundConfig, Time};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
    /// Countdown settings
    #[serde(default)]
    pub timer: TimerSettings,
    /// Clock face appearance
    #[serde(default)]
    pub face: ClockFaceConfig,
    /// Sound played when the countdown runs out
    #[serde(default)]
    pub sound: AlertSoundConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl AppConfig {
    /// Load configuration from the default location.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "minimal-timer", "minimal-timer")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path`, or the default location when `None`, falling back
    /// to the defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        };

        match result {
            Ok(config) => {
                log::info!("Loaded configuration");
                config
            }
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            window: WindowConfig::default(),
            timer: TimerSettings::default(),
            face: ClockFaceConfig::default(),
            sound: AlertSoundConfig::default(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_window_size")]
    pub width: i32,
    #[serde(default = "default_window_size")]
    pub height: i32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_window_size() -> i32 {
    320
}

fn default_title() -> String {
    "Minimal Timer".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_size(),
            height: default_window_size(),
            title: default_title(),
        }
    }
}

/// Countdown settings applied when the window opens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimerSettings {
    /// Countdown value at startup, in seconds
    #[serde(default)]
    pub initial_time: Time,
    /// Open with the countdown paused
    #[serde(default)]
    pub start_paused: bool,
}
