//! Fixed-capacity entity pools
//!
//! Slots are allocated once. Spawning claims the first inactive slot,
//! despawning clears its `active` flag and parks it off-world. Nothing is
//! allocated during steady-state play.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::CollisionDetector;
use super::entity::{Entity, EntityKind, ObstacleKind};
use crate::consts::COIN_SPIN_RATE;

/// A fixed set of reusable slots for one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPool {
    slots: Vec<Entity>,
}

impl EntityPool {
    pub fn new(capacity: usize, kind: EntityKind) -> Self {
        let slots = (0..capacity)
            .map(|i| Entity::parked(i as u32, kind))
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|e| e.active).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|e| e.active)
    }

    /// Claim the first inactive slot, or `None` when every slot is in use.
    ///
    /// The returned entity is already marked active; the caller places it.
    pub fn claim(&mut self) -> Option<&mut Entity> {
        let slot = self.slots.iter_mut().find(|e| !e.active)?;
        slot.active = true;
        slot.spin = 0.0;
        Some(slot)
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.slots.get(id as usize)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter(|e| e.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter(|e| e.active)
    }

    /// Deactivate every slot
    pub fn reset(&mut self) {
        for entity in &mut self.slots {
            entity.recycle();
        }
    }
}

/// What happened to the pools during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolOutcome {
    /// An active obstacle intersected the player
    pub obstacle_hit: bool,
    /// Coins picked up (each already recycled)
    pub coins_collected: u32,
    /// Obstacles that left the world without touching the player
    pub obstacles_passed: u32,
}

/// Obstacle and coin pools, advanced together each frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPools {
    pub obstacles: EntityPool,
    pub coins: EntityPool,
}

impl EntityPools {
    pub fn new(obstacle_capacity: usize, coin_capacity: usize) -> Self {
        Self {
            obstacles: EntityPool::new(obstacle_capacity, EntityKind::Obstacle(ObstacleKind::Jump)),
            coins: EntityPool::new(coin_capacity, EntityKind::Coin),
        }
    }

    pub fn reset(&mut self) {
        self.obstacles.reset();
        self.coins.reset();
    }

    /// Total active entities across both pools
    pub fn active_count(&self) -> usize {
        self.obstacles.active_count() + self.coins.active_count()
    }

    /// Move every active entity toward the player by `distance` and test
    /// those inside the activation window against `player_box`.
    ///
    /// Entities past `despawn_z` are recycled; an obstacle recycled that way
    /// counts as passed.
    pub fn update(
        &mut self,
        distance: f32,
        dt: f32,
        despawn_z: f32,
        player_box: &Aabb,
        detector: &CollisionDetector,
    ) -> PoolOutcome {
        let mut outcome = PoolOutcome::default();

        for obstacle in self.obstacles.iter_active_mut() {
            obstacle.pos.z += distance;

            if obstacle.pos.z > despawn_z {
                obstacle.recycle();
                outcome.obstacles_passed += 1;
            } else if detector.in_window(obstacle.pos.z) && detector.hits(player_box, obstacle) {
                log::debug!(
                    "Obstacle {} ({:?}) hit in lane {}",
                    obstacle.id,
                    obstacle.kind,
                    obstacle.lane
                );
                outcome.obstacle_hit = true;
            }
        }

        for coin in self.coins.iter_active_mut() {
            coin.pos.z += distance;
            coin.spin = (coin.spin + COIN_SPIN_RATE * dt) % std::f32::consts::TAU;

            if coin.pos.z > despawn_z {
                coin.recycle();
            } else if detector.in_window(coin.pos.z) && detector.hits(player_box, coin) {
                coin.recycle();
                outcome.coins_collected += 1;
            }
        }

        outcome
    }
}
