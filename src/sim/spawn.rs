//! Spawn scheduling and guidance trails
//!
//! The scheduler accumulates distance traveled. Each time it passes the
//! current spawn interval it fires one spawn decision: usually an obstacle
//! (with a short coin trail hinting at how to clear it), otherwise a lone
//! coin. Spawns into a full pool are silently dropped.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, ObstacleKind};
use super::pool::EntityPools;
use crate::tuning::Tuning;

/// What a scheduler trigger decided to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnDecision {
    Obstacle,
    Coin,
}

/// Result of an obstacle spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleSpawn {
    /// Obstacle slot id
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: i8,
    /// Trail coins actually placed (the coin pool may run short)
    pub trail_coins: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Distance traveled since the last trigger
    distance: f32,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance accumulated toward the next trigger
    #[inline]
    pub fn accumulated(&self) -> f32 {
        self.distance
    }

    pub fn reset(&mut self) {
        self.distance = 0.0;
    }

    /// Accumulate `distance`; returns true (and restarts the count) once the
    /// total exceeds `interval`.
    pub fn accumulate(&mut self, distance: f32, interval: f32) -> bool {
        self.distance += distance;
        if self.distance > interval {
            self.distance = 0.0;
            true
        } else {
            false
        }
    }

    /// Per-frame scheduling step at the current `speed`
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        distance: f32,
        speed: f32,
        tuning: &Tuning,
        pools: &mut EntityPools,
        rng: &mut R,
    ) -> Option<SpawnDecision> {
        if !self.accumulate(distance, tuning.spawn_interval(speed)) {
            return None;
        }

        let depth = tuning.spawn_distance;
        if rng.random::<f32>() < tuning.obstacle_chance {
            spawn_obstacle(pools, depth, tuning, rng);
            Some(SpawnDecision::Obstacle)
        } else {
            spawn_coin(pools, depth, tuning, rng);
            Some(SpawnDecision::Coin)
        }
    }
}

/// Place an obstacle `depth` units ahead in a random lane with a random
/// subtype, followed by its guidance trail.
pub fn spawn_obstacle<R: Rng + ?Sized>(
    pools: &mut EntityPools,
    depth: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<ObstacleSpawn> {
    let max_lane = tuning.max_lane();
    let Some(obstacle) = pools.obstacles.claim() else {
        log::debug!("Obstacle pool exhausted, spawn skipped");
        return None;
    };

    let lane = rng.random_range(-max_lane..=max_lane);
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    obstacle.kind = EntityKind::Obstacle(kind);
    obstacle.hitbox = kind.hitbox();
    obstacle.lane = lane;
    obstacle.pos = Vec3::new(tuning.lane_x(lane), 0.0, -depth);
    let id = obstacle.id;

    let trail_coins = place_guidance_trail(pools, kind, lane, depth, tuning, rng);
    log::trace!("Spawned {:?} obstacle {} in lane {} with {} trail coins", kind, id, lane, trail_coins);

    Some(ObstacleSpawn {
        id,
        kind,
        lane,
        trail_coins,
    })
}

/// Place a standalone coin `depth` units ahead in a random lane
pub fn spawn_coin<R: Rng + ?Sized>(
    pools: &mut EntityPools,
    depth: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<u32> {
    let max_lane = tuning.max_lane();
    let lane = rng.random_range(-max_lane..=max_lane);
    let placed = place_coin(pools, lane, tuning.coin_height, depth, tuning);
    if placed.is_none() {
        log::debug!("Coin pool exhausted, spawn skipped");
    }
    placed
}

/// Coins that telegraph the action clearing an obstacle of `kind`.
///
/// - Jump: a lead-in coin, one at jump height over the obstacle, one on landing
/// - Roll: three low coins threaded under the overhead blocker
/// - Full: three coins in a neighbouring lane
fn place_guidance_trail<R: Rng + ?Sized>(
    pools: &mut EntityPools,
    kind: ObstacleKind,
    lane: i8,
    depth: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> u32 {
    let s = tuning.guidance_spacing;
    let h = tuning.coin_height;

    let coins: [(i8, f32, f32); 3] = match kind {
        ObstacleKind::Jump => [
            (lane, h, depth - 1.5 * s),
            (lane, h + tuning.jump_height, depth),
            (lane, h, depth + 1.5 * s),
        ],
        ObstacleKind::Roll => {
            let low = h * 0.5;
            [(lane, low, depth - s), (lane, low, depth), (lane, low, depth + s)]
        }
        ObstacleKind::Full => {
            let safe = safe_lane(lane, tuning.max_lane(), rng);
            [(safe, h, depth - s), (safe, h, depth), (safe, h, depth + s)]
        }
    };

    coins
        .iter()
        .filter_map(|&(lane, y, depth)| place_coin(pools, lane, y, depth, tuning))
        .count() as u32
}

/// A lane next to `lane`: toward the center from an edge, random otherwise
fn safe_lane<R: Rng + ?Sized>(lane: i8, max_lane: i8, rng: &mut R) -> i8 {
    if max_lane == 0 {
        return lane;
    }
    if lane >= max_lane {
        lane - 1
    } else if lane <= -max_lane {
        lane + 1
    } else if rng.random_bool(0.5) {
        lane - 1
    } else {
        lane + 1
    }
}

fn place_coin(pools: &mut EntityPools, lane: i8, y: f32, depth: f32, tuning: &Tuning) -> Option<u32> {
    let coin = pools.coins.claim()?;
    coin.lane = lane;
    coin.pos = Vec3::new(tuning.lane_x(lane), y, -depth);
    Some(coin.id)
}
