//! Pooled world entities: obstacles and coins
//!
//! Each entity carries its hitbox directly. The hitbox is a sub-volume in
//! entity-local space, distinct from whatever decorative geometry the
//! presentation layer draws around it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::OFF_WORLD_Y;

/// Which player action clears an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low blocker, clear it by jumping
    Jump,
    /// Overhead blocker, clear it by rolling underneath
    Roll,
    /// Floor-to-sky blocker, clear it by changing lane
    Full,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Jump, ObstacleKind::Roll, ObstacleKind::Full];

    /// Collision volume relative to the obstacle's ground anchor
    pub fn hitbox(self) -> Aabb {
        match self {
            // Top at 1.2, a full-height jump clears it
            ObstacleKind::Jump => {
                Aabb::from_center_size(Vec3::new(0.0, 0.6, 0.0), Vec3::new(0.8, 1.2, 0.8))
            }
            // Bottom at 1.2, a rolling player passes under it
            ObstacleKind::Roll => {
                Aabb::from_center_size(Vec3::new(0.0, 2.2, 0.0), Vec3::new(2.0, 2.0, 0.5))
            }
            ObstacleKind::Full => {
                Aabb::from_center_size(Vec3::new(0.0, 2.5, 0.0), Vec3::new(1.8, 5.0, 1.0))
            }
        }
    }
}

/// Entity kind (pools are per kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(ObstacleKind),
    Coin,
}

/// Coin pickup volume, a little larger than the visible gem
pub fn coin_hitbox() -> Aabb {
    Aabb::from_center_size(Vec3::ZERO, Vec3::ONE)
}

/// A reusable pool slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Slot index within its pool
    pub id: u32,
    pub kind: EntityKind,
    pub lane: i8,
    /// Anchor position; x follows the lane, z is the world depth coordinate
    pub pos: Vec3,
    pub active: bool,
    /// Collision volume in entity-local space
    pub hitbox: Aabb,
    /// Spin angle for coins (radians, visual only)
    #[serde(default)]
    pub spin: f32,
}

impl Entity {
    /// An inactive slot parked off-world
    pub fn parked(id: u32, kind: EntityKind) -> Self {
        let hitbox = match kind {
            EntityKind::Obstacle(obstacle) => obstacle.hitbox(),
            EntityKind::Coin => coin_hitbox(),
        };
        Self {
            id,
            kind,
            lane: 0,
            pos: Vec3::new(0.0, OFF_WORLD_Y, 0.0),
            active: false,
            hitbox,
            spin: 0.0,
        }
    }

    /// Hitbox in world space
    #[inline]
    pub fn world_hitbox(&self) -> Aabb {
        self.hitbox.translated(self.pos)
    }

    /// Distance ahead of the player (positive while approaching)
    #[inline]
    pub fn depth(&self) -> f32 {
        -self.pos.z
    }

    #[inline]
    pub fn obstacle_kind(&self) -> Option<ObstacleKind> {
        match self.kind {
            EntityKind::Obstacle(kind) => Some(kind),
            EntityKind::Coin => None,
        }
    }

    /// Deactivate and move out of the world
    pub fn recycle(&mut self) {
        self.active = false;
        self.pos = Vec3::new(0.0, OFF_WORLD_Y, 0.0);
        self.spin = 0.0;
    }
}
