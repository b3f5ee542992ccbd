//! Collision detection
//!
//! Axis-aligned box overlap between any two entities. Touching edges do not
//! count as a hit.

use super::entity::Entity;

/// Whether the two entities' bounding boxes overlap
#[inline]
pub fn collides(a: &impl Entity, b: &impl Entity) -> bool {
    a.bounding_box().intersects(&b.bounding_box())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{FallingBody, Obstacle};
    use glam::Vec2;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> FallingBody {
        FallingBody::new(Vec2::new(x, y), Vec2::splat(12.0), -3.0)
    }

    fn tile_at(x: f32, y: f32) -> Obstacle {
        Obstacle::new(Vec2::new(x, y), 24.0, 2.0)
    }

    #[test]
    fn test_overlap_hits() {
        assert!(collides(&player_at(90.0, 100.0), &tile_at(80.0, 95.0)));
    }

    #[test]
    fn test_identical_boxes_hit() {
        let a = tile_at(10.0, 10.0);
        assert!(collides(&a, &a.clone()));
    }

    #[test]
    fn test_edge_touching_misses() {
        // Player right edge at x=100, tile left edge at x=100
        assert!(!collides(&player_at(88.0, 50.0), &tile_at(100.0, 50.0)));
        // Player bottom edge at y=62, tile top edge at y=62
        assert!(!collides(&player_at(100.0, 50.0), &tile_at(100.0, 62.0)));
    }

    #[test]
    fn test_disjoint_misses() {
        assert!(!collides(&player_at(0.0, 0.0), &tile_at(200.0, 150.0)));
    }

    #[test]
    fn test_player_inside_tile_hits() {
        assert!(collides(&player_at(105.0, 55.0), &tile_at(100.0, 50.0)));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            px in -50.0f32..400.0, py in -50.0f32..250.0,
            ox in -150.0f32..400.0, oy in -50.0f32..250.0,
        ) {
            let p = player_at(px, py);
            let o = tile_at(ox, oy);
            prop_assert_eq!(collides(&p, &o), collides(&o, &p));
        }

        #[test]
        fn prop_separated_never_collide(
            px in 0.0f32..300.0, py in 0.0f32..180.0, gap in 0.0f32..100.0,
        ) {
            let p = player_at(px, py);
            let right = tile_at(px + 12.0 + gap, py);
            let below = tile_at(px, py + 12.0 + gap);
            prop_assert!(!collides(&p, &right));
            prop_assert!(!collides(&p, &below));
        }
    }
}
