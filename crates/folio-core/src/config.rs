use crate::timeline::TimelineOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
///
/// This is how the binary behaves, not what the site says. Content lives in
/// the registry tables. Loaded from the config file, defaults otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load config from default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            debug!("Reading config from {}", path.display());
            let contents = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("folio");

        Ok(config_dir.join("config.toml"))
    }
}

/// Where to read content from when not using the bundled files
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DataConfig {
    /// JSON array of project records
    pub projects_path: Option<PathBuf>,
    /// TOML file with the content tables
    pub site_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactConfig {
    /// Artificial delay of the simulated submission, in milliseconds
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay() -> u64 {
    2000 // long enough to see the spinner
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// How many projects the home page highlights
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,

    /// About page timeline direction
    #[serde(default = "default_timeline_order")]
    pub timeline_order: TimelineOrder,

    /// TUI event poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_featured_limit() -> usize {
    3
}

fn default_timeline_order() -> TimelineOrder {
    TimelineOrder::MostRecentFirst
}

fn default_tick_rate() -> u64 {
    200
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
            timeline_order: default_timeline_order(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}
