//! Collision detection between the player and pooled entities
//!
//! The player never moves along z; the world scrolls past it. Only entities
//! inside a narrow window around z = 0 can possibly touch the player, so
//! everything else is moved but never tested.

use super::aabb::Aabb;
use super::entity::Entity;
use crate::tuning::Tuning;

/// Per-frame AABB tester limited to the activation window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionDetector {
    /// Half-depth of the activation window around the player
    pub half_depth: f32,
    /// How far the player's box is shrunk to forgive near misses
    pub margin: f32,
}

impl CollisionDetector {
    pub fn new(half_depth: f32, margin: f32) -> Self {
        Self { half_depth, margin }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.activation_half_depth, tuning.hit_margin)
    }

    /// Whether an entity at depth coordinate `z` is eligible for testing
    #[inline]
    pub fn in_window(&self, z: f32) -> bool {
        z > -self.half_depth && z < self.half_depth
    }

    /// The player's collision box: its visual extent minus the margin
    #[inline]
    pub fn player_box(&self, visual_bounds: Aabb) -> Aabb {
        visual_bounds.expanded(-self.margin)
    }

    /// Test an already-shrunk player box against an entity's hitbox
    #[inline]
    pub fn hits(&self, player_box: &Aabb, entity: &Entity) -> bool {
        entity.active && player_box.intersects(&entity.world_hitbox())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityKind, ObstacleKind};
    use glam::Vec3;

    fn standing_player() -> Aabb {
        Aabb::new(Vec3::new(-0.35, 0.0, -0.33), Vec3::new(0.35, 1.625, 0.33))
    }

    fn obstacle_at(kind: ObstacleKind, x: f32, z: f32) -> Entity {
        let mut e = Entity::parked(0, EntityKind::Obstacle(kind));
        e.active = true;
        e.pos = Vec3::new(x, 0.0, z);
        e
    }

    #[test]
    fn test_activation_window_is_open_interval() {
        let detector = CollisionDetector::new(2.0, 0.15);
        assert!(detector.in_window(0.0));
        assert!(detector.in_window(1.99));
        assert!(detector.in_window(-1.99));
        assert!(!detector.in_window(2.0));
        assert!(!detector.in_window(-2.0));
        assert!(!detector.in_window(-60.0));
    }

    #[test]
    fn test_standing_player_hits_every_obstacle_in_lane() {
        let detector = CollisionDetector::new(2.0, 0.15);
        let player = detector.player_box(standing_player());
        for kind in ObstacleKind::ALL {
            assert!(detector.hits(&player, &obstacle_at(kind, 0.0, 0.0)), "{kind:?}");
        }
    }

    #[test]
    fn test_adjacent_lane_is_safe() {
        let detector = CollisionDetector::new(2.0, 0.15);
        let player = detector.player_box(standing_player());
        for kind in ObstacleKind::ALL {
            assert!(!detector.hits(&player, &obstacle_at(kind, 2.0, 0.0)), "{kind:?}");
        }
    }

    #[test]
    fn test_margin_forgives_grazing_contact() {
        let detector = CollisionDetector::new(2.0, 0.15);
        let player = detector.player_box(standing_player());
        // Jump hitbox spans x ±0.4; place it so it only grazes the unshrunk box
        let grazing = obstacle_at(ObstacleKind::Jump, 0.35 + 0.4 - 0.05, 0.0);
        assert!(standing_player().intersects(&grazing.world_hitbox()));
        assert!(!detector.hits(&player, &grazing));
    }

    #[test]
    fn test_inactive_entity_never_hits() {
        let detector = CollisionDetector::new(2.0, 0.15);
        let player = detector.player_box(standing_player());
        let mut obstacle = obstacle_at(ObstacleKind::Full, 0.0, 0.0);
        obstacle.active = false;
        assert!(!detector.hits(&player, &obstacle));
    }
}
