//! Falling-body integration
//!
//! The jump impulse is not a one-off velocity kick: it is added as a constant
//! offset every frame, and a jump only resets the accumulated fall speed.
//! Displacement per frame is `min(fall_speed + jump_impulse, terminal_velocity)`
//! after gravity has been added, so a flap rises quickly and then decays into
//! a fall as gravity catches up.

use super::entity::FallingBody;

/// Fixed physics constants for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub gravity: f32,
    pub terminal_velocity: f32,
}

impl Physics {
    pub fn new(gravity: f32, terminal_velocity: f32) -> Self {
        Self {
            gravity,
            terminal_velocity,
        }
    }

    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self::new(settings.gravity, settings.terminal_velocity)
    }

    /// Accumulate gravity and move the body. No clamping.
    pub fn apply_gravity(&self, body: &mut FallingBody) {
        body.fall_speed += self.gravity;
        body.pos.y += (body.fall_speed + body.jump_impulse).min(self.terminal_velocity);
    }

    /// Gravity followed by the playfield clamp (used while a run is live)
    pub fn step_clamped(&self, body: &mut FallingBody, playfield_height: f32) {
        self.apply_gravity(body);
        clamp_to_playfield(body, playfield_height);
    }
}

/// Flap: cancel accumulated fall speed. Position is untouched.
#[inline]
pub fn jump(body: &mut FallingBody) {
    body.fall_speed = 0.0;
}

/// Keep the body inside `[0, playfield_height - height]`
#[inline]
pub fn clamp_to_playfield(body: &mut FallingBody, playfield_height: f32) {
    body.pos.y = body.pos.y.min(playfield_height - body.size.y).max(0.0);
}
