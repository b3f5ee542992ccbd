//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame-based physics (no wall-clock deltas)
//! - Seeded RNG only
//! - Time enters only through `TickInput::now_ms`
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use entity::{Entity, FallingBody, Obstacle, Rect};
pub use physics::{Physics, clamp_to_playfield, jump};
pub use spawner::{Spawner, cull};
pub use state::{GamePhase, GameState, RunSession, Snapshot};
pub use tick::{InputEvent, TickInput, TickOutput, tick};
