//! Obstacle spawning and culling
//!
//! Spawning is time gated on wall-clock milliseconds; culling is a pure filter.
//! The two never touch the same state, so they compose in either order.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::Obstacle;
use super::state::RunSession;
use crate::settings::Settings;

/// Time-gated obstacle factory
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    interval_ms: u64,
    /// New obstacles enter at the right edge of the playfield
    spawn_x: f32,
    /// Largest integer y that keeps a tile inside the playfield
    max_y: u32,
    tile_size: f32,
    speed: f32,
}

impl Spawner {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            interval_ms: settings.spawn_interval_ms,
            spawn_x: settings.playfield_width,
            max_y: settings.max_obstacle_y().max(0.0) as u32,
            tile_size: settings.tile_size,
            speed: settings.obstacle_speed,
        }
    }

    /// Whether the gate is open at `now_ms`
    pub fn is_due(&self, now_ms: u64, last_spawn_ms: u64) -> bool {
        now_ms.saturating_sub(last_spawn_ms) >= self.interval_ms
    }

    /// Spawn one obstacle if the interval has elapsed since the last spawn.
    ///
    /// On a spawn the session's score goes up by one and its spawn timer
    /// restarts at `now_ms`.
    pub fn maybe_spawn(&mut self, now_ms: u64, session: &mut RunSession) -> Option<Obstacle> {
        if !self.is_due(now_ms, session.last_spawn_ms) {
            return None;
        }

        session.score += 1;
        session.last_spawn_ms = now_ms;

        let y = self.rng.random_range(0..=self.max_y) as f32;
        log::debug!("Spawned obstacle at y={y} (score {})", session.score);
        Some(Obstacle::new(
            Vec2::new(self.spawn_x, y),
            self.tile_size,
            self.speed,
        ))
    }
}

/// Drop every obstacle that has scrolled past `cull_x`
pub fn cull(obstacles: Vec<Obstacle>, cull_x: f32) -> Vec<Obstacle> {
    obstacles
        .into_iter()
        .filter(|o| !o.is_off_screen(cull_x))
        .collect()
}
