//! Configuration file support for easel.
//!
//! Settings are read from `~/.config/easel/config.toml` and cover defaults for
//! new windows, the polling interval of blocking input waits, and rendering
//! quality. If no config file exists, defaults are used.

pub mod types;

pub use types::{InputConfig, RenderConfig, WindowConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [window]
/// title = "Risk"
/// width = 640
/// height = 480
/// autoflush = false
/// background = "#1e1e2e"
///
/// [input]
/// poll_interval_ms = 50
///
/// [render]
/// antialias = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Defaults for new windows
    #[serde(default)]
    pub window: WindowConfig,

    /// Blocking input wait tuning
    #[serde(default)]
    pub input: InputConfig,

    /// Rasteriser options
    #[serde(default)]
    pub render: RenderConfig,
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    File(PathBuf),
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

impl Config {
    /// Clamps out-of-range values, logging a warning for each.
    ///
    /// Validated ranges:
    /// - `window.width`, `window.height`: 2 - 8192
    /// - `input.poll_interval_ms`: 1 - 1000
    pub fn validate_and_clamp(&mut self) {
        if !(2..=8192).contains(&self.window.width) {
            log::warn!(
                "Invalid window width {}, clamping to 2-8192 range",
                self.window.width
            );
            self.window.width = self.window.width.clamp(2, 8192);
        }

        if !(2..=8192).contains(&self.window.height) {
            log::warn!(
                "Invalid window height {}, clamping to 2-8192 range",
                self.window.height
            );
            self.window.height = self.window.height.clamp(2, 8192);
        }

        if !(1..=1000).contains(&self.input.poll_interval_ms) {
            log::warn!(
                "Invalid poll_interval_ms {}, clamping to 1-1000 range",
                self.input.poll_interval_ms
            );
            self.input.poll_interval_ms = self.input.poll_interval_ms.clamp(1, 1000);
        }

        if crate::draw::Color::parse(&self.window.background).is_none() {
            log::warn!(
                "Unknown background color '{}', falling back to 'white'",
                self.window.background
            );
            self.window.background = "white".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("easel");

        Ok(config_dir.join("config.toml"))
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source).context("Failed to parse config")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Loads the user's configuration file, or defaults if there is none.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<LoadedConfig> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Default,
            });
        }

        let config = Self::load_from(&config_path)?;
        info!("Loaded config from {}", config_path.display());
        Ok(LoadedConfig {
            config,
            source: ConfigSource::File(config_path),
        })
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
