//! Player configuration loaded from TOML.
//!
//! ```toml
//! [preview]
//! max_flushes_per_second = 30
//!
//! [gestures]
//! debounce_ms = 320
//! settle_ms = 180
//! dominance_ratio = 0.6
//!
//! [theme]
//! force_high_contrast = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Top-level player configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub preview: PreviewConfig,
    pub gestures: GestureConfig,
    pub theme: ThemeConfig,
}

impl PlayerConfig {
    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Live preview flush rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub max_flushes_per_second: u32,
}

impl PreviewConfig {
    /// Minimum time between two flushes, in milliseconds.
    pub fn min_interval_ms(&self) -> u64 {
        1000 / u64::from(self.max_flushes_per_second.max(1))
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_flushes_per_second: 30,
        }
    }
}

/// Sentinel-based gesture navigation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Lock window after a gesture fires.
    pub debounce_ms: u64,

    /// Delay after a navigation before gestures re-arm.
    pub settle_ms: u64,

    /// Fraction of a sentinel that must be visible for it to count as dominant.
    pub dominance_ratio: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 320,
            settle_ms: 180,
            dominance_ratio: 0.6,
        }
    }
}

/// Theme defaults applied by the player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub force_high_contrast: bool,
}
