//! Game configuration
//!
//! Loaded from an optional JSON file; any missing field falls back to the
//! defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Surface ===
    /// Visible surface width in surface units
    pub surface_width: u32,
    /// Visible surface height in surface units
    pub surface_height: u32,

    // === Timing ===
    /// Frame updates per second
    pub fps: u32,
    /// Spawn-refresh period in milliseconds
    pub spawn_interval_ms: u64,

    // === Obstacles ===
    /// Obstacles generated per batch
    pub num_obstacles: usize,
    /// Optional cap on the obstacle collection after a refresh (None = uncapped)
    pub max_obstacles: Option<usize>,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Spawn band thickness around the surface
    pub spawn_offset: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_size: f32,

    /// RNG seed (None = seeded from the system clock)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            fps: FPS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            num_obstacles: NUM_OBSTACLES,
            max_obstacles: None,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,
            spawn_offset: SPAWN_OFFSET,

            player_speed: PLAYER_SPEED,
            player_size: PLAYER_SIZE,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Period of the frame tick in milliseconds
    pub fn tick_interval_ms(&self) -> u64 {
        (1000 / u64::from(self.fps.max(1))).max(1)
    }

    /// Reject configurations the spawn loop or the scheduler cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        }

        if self.surface_width == 0 || self.surface_height == 0 {
            return invalid("surface dimensions must be positive");
        }
        if self.fps == 0 {
            return invalid("fps must be positive");
        }
        if self.spawn_interval_ms == 0 {
            return invalid("spawn interval must be positive");
        }
        if self.num_obstacles == 0 {
            return invalid("num_obstacles must be positive");
        }
        if let Some(cap) = self.max_obstacles {
            if cap < self.num_obstacles {
                return invalid("max_obstacles must hold at least one batch");
            }
        }
        let floats = [
            self.min_speed,
            self.max_speed,
            self.min_width,
            self.max_width,
            self.spawn_offset,
            self.player_speed,
            self.player_size,
        ];
        if !floats.iter().all(|v| v.is_finite()) {
            return invalid("speeds, sizes and spawn offset must be finite");
        }
        // NaN fails every comparison below, so use negated forms
        if !(self.min_width > 0.0 && self.min_width <= self.max_width) {
            return invalid("width range must be positive and ordered");
        }
        if !(self.min_speed > 0.0 && self.min_speed <= self.max_speed) {
            return invalid("speed range must be positive and ordered");
        }
        if !(self.spawn_offset > 0.0) {
            return invalid("spawn offset must be positive");
        }
        if !(self.player_speed > 0.0 && self.player_size > 0.0) {
            return invalid("player speed and size must be positive");
        }
        Ok(())
    }

    /// Load a config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
