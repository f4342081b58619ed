//! Configuration module for replay-controls
//!
//! This module holds the tunables of the control surface: the offered
//! playback speeds, the rewind step, the compaction breakpoint and the
//! skip-idle thresholds consumed by the playback driver.
//!
//! # Config Location
//!
//! The optional config file lives in the platform-appropriate config directory
//! under `dev.replay-controls`:
//! - **Linux**: `~/.config/dev.replay-controls/replay.toml`
//! - **macOS**: `~/Library/Application Support/dev.replay-controls/replay.toml`
//! - **Windows**: `%APPDATA%\dev.replay-controls\replay.toml`
//!
//! Playback state itself is never persisted.
//!
//! # Example
//!
//! ```ignore
//! use replay_controls::config::ReplayConfig;
//!
//! let config = ReplayConfig::load_or_default();
//! assert!(config.is_allowed_speed(1.0));
//! ```

use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.replay-controls";

/// Config filename
pub const CONFIG_FILE: &str = "replay.toml";

/// Speeds offered by the speed selector
pub const DEFAULT_SPEEDS: [f64; 8] = [0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0];

/// Distance covered by the rewind control
pub const DEFAULT_REWIND_STEP_MS: f64 = 10_000.0;

/// Containers narrower than this render the compact control bar
pub const DEFAULT_COMPACT_WIDTH_PX: f32 = 400.0;

/// Gaps longer than this count as idle for skip-inactive playback
pub const DEFAULT_INACTIVITY_THRESHOLD_MS: i64 = 5_000;

/// How far before the next activity a skip lands
pub const DEFAULT_SKIP_LEAD_IN_MS: i64 = 1_000;

/// Driver tick period (~60Hz)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Control surface configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Playback speeds offered to the user, in display order
    pub allowed_speeds: Vec<f64>,

    /// Speed a freshly loaded session plays at
    pub default_speed: f64,

    /// Rewind distance in milliseconds
    pub rewind_step_ms: f64,

    /// Width below which the control bar is compacted
    pub compact_width_px: f32,

    /// Extra width required before leaving the compact layout (0 = none)
    pub compact_hysteresis_px: f32,

    /// Idle gap length that triggers a skip when skip-inactive is on
    pub inactivity_threshold_ms: i64,

    /// Lead-in kept before the next activity when skipping
    pub skip_lead_in_ms: i64,

    /// Playback driver tick period in milliseconds
    pub tick_interval_ms: u64,

    /// Directory for rolling log files (stdout only when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            allowed_speeds: DEFAULT_SPEEDS.to_vec(),
            default_speed: 1.0,
            rewind_step_ms: DEFAULT_REWIND_STEP_MS,
            compact_width_px: DEFAULT_COMPACT_WIDTH_PX,
            compact_hysteresis_px: 0.0,
            inactivity_threshold_ms: DEFAULT_INACTIVITY_THRESHOLD_MS,
            skip_lead_in_ms: DEFAULT_SKIP_LEAD_IN_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            log_dir: None,
        }
    }
}

impl ReplayConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ReplayError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded replay config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load replay config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save the config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReplayError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| ReplayError::Config(format!("Failed to write config: {}", e)))
    }

    /// Check the invariants the playback clock relies on
    pub fn validate(&self) -> Result<()> {
        if self.allowed_speeds.is_empty() {
            return Err(ReplayError::Config(
                "allowed_speeds must not be empty".to_string(),
            ));
        }

        if let Some(bad) = self
            .allowed_speeds
            .iter()
            .find(|s| !s.is_finite() || **s <= 0.0)
        {
            return Err(ReplayError::Config(format!(
                "playback speed {} must be finite and positive",
                bad
            )));
        }

        if !self.is_allowed_speed(self.default_speed) {
            return Err(ReplayError::Config(format!(
                "default_speed {} is not one of allowed_speeds",
                self.default_speed
            )));
        }

        if !self.rewind_step_ms.is_finite() || self.rewind_step_ms < 0.0 {
            return Err(ReplayError::Config(
                "rewind_step_ms must be a non-negative number".to_string(),
            ));
        }

        if !self.compact_width_px.is_finite() || self.compact_width_px < 0.0 {
            return Err(ReplayError::Config(
                "compact_width_px must be a non-negative number".to_string(),
            ));
        }

        if !self.compact_hysteresis_px.is_finite() || self.compact_hysteresis_px < 0.0 {
            return Err(ReplayError::Config(
                "compact_hysteresis_px must be a non-negative number".to_string(),
            ));
        }

        if self.inactivity_threshold_ms < 0 {
            return Err(ReplayError::Config(
                "inactivity_threshold_ms must not be negative".to_string(),
            ));
        }

        if self.skip_lead_in_ms < 0 {
            return Err(ReplayError::Config(
                "skip_lead_in_ms must not be negative".to_string(),
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err(ReplayError::Config(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `speed` is one of the offered speeds
    pub fn is_allowed_speed(&self, speed: f64) -> bool {
        self.allowed_speeds.iter().any(|s| *s == speed)
    }
}
