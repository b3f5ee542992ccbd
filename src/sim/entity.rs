//! Entities: the falling player body and scrolling obstacles
//!
//! Positions are top-left anchored, in playfield units.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner (exclusive)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap. Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Anything with a position, a fixed size and a box to collide with
pub trait Entity {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;

    fn bounding_box(&self) -> Rect {
        Rect::new(self.position(), self.size())
    }
}

/// The player: falls under gravity, kept up by jumps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingBody {
    pub pos: Vec2,
    pub size: Vec2,
    /// Accumulated downward speed, reset to 0 by a jump
    pub fall_speed: f32,
    /// Upward offset applied every frame (negative)
    pub jump_impulse: f32,
}

impl FallingBody {
    pub fn new(pos: Vec2, size: Vec2, jump_impulse: f32) -> Self {
        Self {
            pos,
            size,
            fall_speed: 0.0,
            jump_impulse,
        }
    }

    /// A body at the configured start position
    pub fn spawn(settings: &Settings) -> Self {
        Self::new(
            settings.start_position(),
            settings.player_size,
            settings.jump_impulse,
        )
    }
}

impl Entity for FallingBody {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// A square tile scrolling right to left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub side: f32,
    /// Leftward speed (units/frame)
    pub speed: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2, side: f32, speed: f32) -> Self {
        Self { pos, side, speed }
    }

    /// Scroll one frame to the left
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Past the culling line on the left
    pub fn is_off_screen(&self, cull_x: f32) -> bool {
        self.pos.x < cull_x
    }
}

impl Entity for Obstacle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::splat(self.side)
    }
}
