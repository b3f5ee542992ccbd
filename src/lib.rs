//! Flappy - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `renderer`: Per-frame draw lists and terminal presentation
//! - `platform`: Frame pacing and input mapping
//! - `persistence`: Best-score storage
//! - `settings`: Data-driven game tuning

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use persistence::{JsonFileStore, MemoryStore, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the frame driver
    pub const FPS: u32 = 60;

    /// Internal render resolution. Gameplay math never sees the output size.
    pub const PLAYFIELD_HEIGHT: f32 = 196.0;
    /// 16:9 aspect applied to the fixed height
    pub const PLAYFIELD_WIDTH: f32 = 348.0;

    /// Obstacles are square tiles
    pub const TILE_SIZE: f32 = 24.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 12.0;
    pub const PLAYER_HEIGHT: f32 = 12.0;

    /// Added to the fall speed every frame (units/frame²)
    pub const GRAVITY: f32 = 0.2;
    /// Constant upward offset re-applied every frame (units/frame)
    pub const JUMP_IMPULSE: f32 = -3.0;
    /// Cap on per-frame downward displacement (units/frame)
    pub const TERMINAL_VELOCITY: f32 = 5.0;

    /// Leftward obstacle speed (units/frame)
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Time between obstacle spawns
    pub const SPAWN_INTERVAL_MS: u64 = 250;
    /// Obstacles left of this x are culled
    pub const CULL_X: f32 = -100.0;

    /// Default best-score file
    pub const SCORE_FILE: &str = "highscore.json";
    /// Optional tuning overrides, read from the working directory
    pub const SETTINGS_FILE: &str = "settings.json";
}
