//! Game settings
//!
//! Board layout, lane speeds and pacing. Persisted as JSON; every field falls
//! back to the reference configuration when missing.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Board, ClockPolicy, Engine};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Layout rows, goal lane first (`x` = hazard, `.` = empty)
    pub lanes: Vec<String>,
    /// Cells per scroll step for each lane
    pub speeds: Vec<i32>,

    // === Timing ===
    /// Lanes scroll every `scroll_period` ticks
    pub scroll_period: u64,
    /// Wall-clock length of a tick in ms (drivers only)
    pub tick_interval_ms: u64,
    /// Max ticks per pacer update
    pub max_substeps: u32,

    // === Session ===
    /// Tick counter behaviour on retry
    pub clock_policy: ClockPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lanes: REFERENCE_LANES.iter().map(|s| s.to_string()).collect(),
            speeds: REFERENCE_SPEEDS.to_vec(),
            scroll_period: SCROLL_PERIOD,
            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,
            clock_policy: ClockPolicy::Restart,
        }
    }
}

impl Settings {
    /// Parse the layout into a board
    pub fn board(&self) -> Result<Board, ConfigError> {
        Board::from_layout(self.lanes.as_slice(), &self.speeds)
    }

    /// Run every construction-time check without keeping the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        Engine::from_settings(self).map(|_| ())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to the reference configuration on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
