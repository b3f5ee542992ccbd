//! Game state and core simulation types
//!
//! Everything a run mutates lives here and is owned by `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{FallingBody, Obstacle};
use super::physics::Physics;
use super::spawner::Spawner;
use crate::persistence::ScoreStore;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player waiting at the start position for the first flap
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, player falling off screen
    GameOver,
}

/// Per-run counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSession {
    /// One point per spawned obstacle
    pub score: u64,
    /// Best score as loaded from the store at run start
    pub highest_score: u64,
    /// Time of the last spawn (or of the run's creation)
    pub last_spawn_ms: u64,
    /// Set once the game-over best-score check has run
    #[serde(default)]
    pub best_checked: bool,
}

impl RunSession {
    pub fn new(highest_score: u64, now_ms: u64) -> Self {
        Self {
            score: 0,
            highest_score,
            last_spawn_ms: now_ms,
            best_checked: false,
        }
    }
}

/// Immutable copy of what a frame shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub playfield: Vec2,
    pub phase: GamePhase,
    pub body: FallingBody,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub highest_score: u64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub physics: Physics,
    pub phase: GamePhase,
    pub body: FallingBody,
    /// Live obstacles, unordered
    pub obstacles: Vec<Obstacle>,
    pub session: RunSession,
    pub(crate) spawner: Spawner,
}

impl GameState {
    /// Create a new game, reading the best score from `store`
    pub fn new(settings: Settings, store: &mut dyn ScoreStore, now_ms: u64) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, store, now_ms, seed)
    }

    /// Create a new game with an explicit obstacle RNG seed
    pub fn with_seed(
        settings: Settings,
        store: &mut dyn ScoreStore,
        now_ms: u64,
        seed: u64,
    ) -> Self {
        let highest = store.load_highest();
        log::info!("New game (best score {highest}, seed {seed})");
        Self {
            physics: Physics::from_settings(&settings),
            phase: GamePhase::NotStarted,
            body: FallingBody::spawn(&settings),
            obstacles: Vec::new(),
            session: RunSession::new(highest, now_ms),
            spawner: Spawner::new(&settings, seed),
            settings,
        }
    }

    /// Reinitialise every run field in place.
    ///
    /// The best score is re-read from the store so external edits are seen.
    /// The obstacle RNG keeps running across runs.
    pub fn reset(&mut self, store: &mut dyn ScoreStore, now_ms: u64) {
        let highest = store.load_highest();
        self.phase = GamePhase::NotStarted;
        self.body = FallingBody::spawn(&self.settings);
        self.obstacles.clear();
        self.session = RunSession::new(highest, now_ms);
        log::info!("Restarted (best score {highest})");
    }

    pub fn game_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn highest_score(&self) -> u64 {
        self.session.highest_score
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            playfield: self.settings.playfield(),
            phase: self.phase,
            body: self.body.clone(),
            obstacles: self.obstacles.clone(),
            score: self.session.score,
            highest_score: self.session.highest_score,
        }
    }
}
