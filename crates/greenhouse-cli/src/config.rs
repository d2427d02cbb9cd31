//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use greenhouse_core::feed::{DEFAULT_INTERVAL, DEFAULT_SENSOR_COUNT};
use greenhouse_core::{FilterSettings, ITEMS_PER_PAGE, LevelConfig, MAX_DATA_POINTS};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Simulated feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Store and table settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Filter ranges applied at start
    #[serde(default)]
    pub filters: FilterSettings,

    /// Bands used to colour metric values
    #[serde(default)]
    pub levels: LevelConfig,
}

/// Simulated feed settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Number of simulated sensors.
    pub sensor_count: usize,
    /// Milliseconds between batches.
    pub interval_ms: u64,
    /// Fixed RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sensor_count: DEFAULT_SENSOR_COUNT,
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            seed: None,
        }
    }
}

/// Store and table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum number of readings kept in memory.
    pub capacity: usize,
    /// Readings per page.
    pub page_size: usize,
    /// Start with the oldest readings first.
    pub ascending: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_DATA_POINTS,
            page_size: ITEMS_PER_PAGE,
            ascending: false,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("greenhouse")
            .join("config.toml")
    }

    /// Load config from `path`, or return default if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        warn!("Failed to parse config {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = self.to_toml()?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Render the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
