//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Defaults for windows opened with `Window::from_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WindowConfig {
    /// Title shown by the platform for new windows
    #[serde(default = "default_title")]
    pub title: String,

    /// Width in device pixels (valid range: 2 - 8192)
    #[serde(default = "default_size")]
    pub width: u32,

    /// Height in device pixels (valid range: 2 - 8192)
    #[serde(default = "default_size")]
    pub height: u32,

    /// Pump the frame loop after every drawing change.
    /// Set to false and call `update` manually to batch large scenes.
    #[serde(default = "default_autoflush")]
    pub autoflush: bool,

    /// Background color specifier (named color or `#rrggbb`)
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_size(),
            height: default_size(),
            autoflush: default_autoflush(),
            background: default_background(),
        }
    }
}

/// Input polling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Milliseconds slept between polls while `get_mouse`/`get_key` wait
    /// (valid range: 1 - 1000)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
        }
    }
}

/// Rasterisation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Smooth edges of shapes and text in rendered output
    #[serde(default = "default_antialias")]
    pub antialias: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialias: default_antialias(),
        }
    }
}

fn default_title() -> String {
    "Graphics Window".to_string()
}

fn default_size() -> u32 {
    200
}

fn default_autoflush() -> bool {
    true
}

fn default_background() -> String {
    "white".to_string()
}

fn default_poll_interval() -> u64 {
    100
}

fn default_antialias() -> bool {
    true
}
