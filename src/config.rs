use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::ThemePreset;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub interface: InterfaceConfig,
}

/// Where and how to reach the recommendation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL; `/recommend` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (transport default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Window appearance and behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Color theme preset
    #[serde(default)]
    pub theme: ThemePreset,
    /// Seconds each hero clip plays before the carousel advances
    #[serde(default = "default_hero_interval")]
    pub hero_interval_secs: u64,
    /// Start with the background audio indicator on
    #[serde(default)]
    pub audio_on_start: bool,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            hero_interval_secs: default_hero_interval(),
            audio_on_start: false,
        }
    }
}

fn default_hero_interval() -> u64 {
    8
}

impl Config {
    /// Project directories shared by config and shell history
    pub fn project_dirs() -> Result<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "insight", "Insight")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
