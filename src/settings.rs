//! Game settings
//!
//! Level generation parameters plus the tick speed handed to whatever drives
//! the simulation clock. Nothing here is persisted; the native runner can read
//! a JSON file once at startup.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Tick speed presets (Slow / Medium / Fast buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Medium => "Medium",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" | "1" => Some(SpeedPreset::Slow),
            "medium" | "med" | "2" => Some(SpeedPreset::Medium),
            "fast" | "3" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Milliseconds between ticks
    pub fn tick_interval_ms(&self) -> u64 {
        match self {
            SpeedPreset::Slow => 800,
            SpeedPreset::Medium => DEFAULT_TICK_INTERVAL_MS,
            SpeedPreset::Fast => 250,
        }
    }
}

/// Level generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Board side length N
    pub side_length: u32,
    /// Random placement attempts per level
    pub placement_attempts: u32,
    /// Chance a placement is a mirror rather than a planet (0.0 - 1.0)
    pub mirror_probability: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            side_length: GRID_SIZE,
            placement_attempts: PLACEMENT_ATTEMPTS,
            mirror_probability: MIRROR_PROBABILITY,
        }
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.side_length == 0 {
            return Err(SimError::InvalidConfig(
                "side_length must be at least 1".into(),
            ));
        }
        if self.side_length > MAX_SIDE_LENGTH {
            return Err(SimError::InvalidConfig(format!(
                "side_length {} exceeds the maximum of {MAX_SIDE_LENGTH}",
                self.side_length
            )));
        }
        if !(0.0..=1.0).contains(&self.mirror_probability) {
            return Err(SimError::InvalidConfig(format!(
                "mirror_probability {} is outside 0.0..=1.0",
                self.mirror_probability
            )));
        }
        Ok(())
    }
}

/// Everything a session needs to know up front
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: LevelConfig,
    pub speed: SpeedPreset,
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.level.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
