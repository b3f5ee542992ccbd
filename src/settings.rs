//! Game settings and tuning
//!
//! Loaded once at startup from an optional JSON file and passed by reference
//! to everything that needs a constant.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected settings
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A size or speed that has to be strictly positive was not
    NonPositive(&'static str),
    /// The playfield cannot hold a single obstacle tile
    PlayfieldTooSmall,
    /// The player would start outside the playfield
    StartOutOfBounds,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NonPositive(field) => write!(f, "{field} must be greater than zero"),
            SettingsError::PlayfieldTooSmall => write!(f, "playfield is smaller than one tile"),
            SettingsError::StartOutOfBounds => write!(f, "player start lies outside the playfield"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Player ===
    pub player_size: Vec2,
    /// Top-left start position; `None` means a quarter across, half way down
    pub player_start: Option<Vec2>,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub terminal_velocity: f32,

    // === Obstacles ===
    pub tile_size: f32,
    pub obstacle_speed: f32,
    pub spawn_interval_ms: u64,
    pub cull_x: f32,

    // === Driver ===
    pub fps: u32,
    pub score_file: PathBuf,
    /// Obstacle RNG seed; random per process when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_start: None,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            terminal_velocity: TERMINAL_VELOCITY,

            tile_size: TILE_SIZE,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            cull_x: CULL_X,

            fps: FPS,
            score_file: PathBuf::from(SCORE_FILE),
            seed: None,
        }
    }
}

impl Settings {
    /// Playfield dimensions as a vector
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Where the player appears at the start of every run
    pub fn start_position(&self) -> Vec2 {
        self.player_start.unwrap_or(Vec2::new(
            self.playfield_width / 4.0,
            self.playfield_height / 2.0,
        ))
    }

    /// Lowest valid obstacle y (top-left anchored)
    pub fn max_obstacle_y(&self) -> f32 {
        self.playfield_height - self.tile_size
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("tile_size", self.tile_size),
            ("terminal_velocity", self.terminal_velocity),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(SettingsError::NonPositive(field));
            }
        }
        if self.fps == 0 {
            return Err(SettingsError::NonPositive("fps"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::NonPositive("spawn_interval_ms"));
        }
        if self.tile_size > self.playfield_height || self.tile_size > self.playfield_width {
            return Err(SettingsError::PlayfieldTooSmall);
        }

        let start = self.start_position();
        let max = self.playfield() - self.player_size;
        if start.x < 0.0 || start.y < 0.0 || start.x > max.x || start.y > max.y {
            return Err(SettingsError::StartOutOfBounds);
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        let settings: Settings = match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                return Self::default();
            }
        };

        match settings.validate() {
            Ok(()) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
