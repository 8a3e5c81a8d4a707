//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so tests and level
//! designers can override it. Defaults come from [`crate::consts`].

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub lane_width: f32,
    /// Number of lanes (odd, centered on lane 0)
    pub lane_count: u8,
    pub ground_segment_length: f32,
    pub ground_segment_count: usize,

    // === Player ===
    pub lane_change_duration: f32,
    pub jump_duration: f32,
    pub jump_height: f32,
    pub roll_duration: f32,
    /// Visual extent at rest (width, height, depth); feet at y = 0
    pub player_size: Vec3,

    // === Speed ===
    pub speed_start: f32,
    pub speed_max: f32,
    /// Acceleration while Playing (units/sec²)
    pub speed_ramp: f32,

    // === Spawning ===
    pub spawn_distance: f32,
    /// Spawn interval at starting speed (distance units)
    pub obstacle_interval_max: f32,
    /// Spawn interval at maximum speed (distance units)
    pub obstacle_interval_min: f32,
    pub obstacle_chance: f32,
    pub guidance_spacing: f32,
    pub coin_height: f32,
    pub obstacle_capacity: usize,
    pub coin_capacity: usize,

    // === Collision ===
    pub activation_half_depth: f32,
    pub despawn_z: f32,
    pub hit_margin: f32,

    // === Session ===
    pub transition_duration: f32,
    /// Seconds without activity before returning to the menu (None = never)
    pub idle_timeout: Option<f32>,
    pub event_queue_capacity: usize,
    pub menu_wind_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            lane_count: LANE_COUNT,
            ground_segment_length: GROUND_SEGMENT_LENGTH,
            ground_segment_count: GROUND_SEGMENT_COUNT,

            lane_change_duration: LANE_CHANGE_DURATION,
            jump_duration: JUMP_DURATION,
            jump_height: JUMP_HEIGHT,
            roll_duration: ROLL_DURATION,
            player_size: Vec3::new(PLAYER_WIDTH, PLAYER_HEIGHT, PLAYER_DEPTH),

            speed_start: GAME_SPEED_START,
            speed_max: GAME_SPEED_MAX,
            speed_ramp: GAME_SPEED_RAMP,

            spawn_distance: SPAWN_DISTANCE,
            obstacle_interval_max: OBSTACLE_INTERVAL,
            obstacle_interval_min: OBSTACLE_INTERVAL_MIN,
            obstacle_chance: OBSTACLE_CHANCE,
            guidance_spacing: GUIDANCE_SPACING,
            coin_height: COIN_HEIGHT,
            obstacle_capacity: OBSTACLE_POOL_SIZE,
            coin_capacity: COIN_POOL_SIZE,

            activation_half_depth: ACTIVATION_HALF_DEPTH,
            despawn_z: DESPAWN_Z,
            hit_margin: HIT_MARGIN,

            transition_duration: TRANSITION_DURATION,
            idle_timeout: Some(IDLE_TIMEOUT),
            event_queue_capacity: EVENT_QUEUE_CAPACITY,
            menu_wind_speed: MENU_WIND_SPEED,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.lane_count == 0 || self.lane_count % 2 == 0 {
            return invalid("lane_count", "must be odd");
        }
        if self.lane_width <= 0.0 {
            return invalid("lane_width", "must be positive");
        }
        if self.jump_duration <= 0.0 || self.roll_duration <= 0.0 {
            return invalid("jump_duration/roll_duration", "must be positive");
        }
        if self.lane_change_duration < 0.0 {
            return invalid("lane_change_duration", "must not be negative");
        }
        if self.speed_start < 0.0 {
            return invalid("speed_start", "must not be negative");
        }
        if self.speed_max < self.speed_start {
            return invalid("speed_max", "must be at least speed_start");
        }
        if self.speed_ramp < 0.0 {
            return invalid("speed_ramp", "must not be negative");
        }
        if self.obstacle_interval_min <= 0.0 {
            return invalid("obstacle_interval_min", "must be positive");
        }
        if self.obstacle_interval_max < self.obstacle_interval_min {
            return invalid("obstacle_interval_max", "must be at least obstacle_interval_min");
        }
        if !(0.0..=1.0).contains(&self.obstacle_chance) {
            return invalid("obstacle_chance", "must be within [0, 1]");
        }
        if self.spawn_distance <= self.despawn_z.max(self.activation_half_depth) {
            return invalid("spawn_distance", "must lie ahead of the despawn line and activation window");
        }
        if self.guidance_spacing < 0.0 {
            return invalid("guidance_spacing", "must not be negative");
        }
        if self.coin_height < 0.0 {
            return invalid("coin_height", "must not be negative");
        }
        if self.jump_height < 0.0 {
            return invalid("jump_height", "must not be negative");
        }
        if !self.player_size.cmpgt(Vec3::ZERO).all() {
            return invalid("player_size", "must be positive on every axis");
        }
        if self.obstacle_capacity == 0 || self.coin_capacity == 0 {
            return invalid("obstacle_capacity/coin_capacity", "must be non-zero");
        }
        if self.ground_segment_count == 0 || self.ground_segment_length <= 0.0 {
            return invalid("ground_segment_count/ground_segment_length", "must be positive");
        }
        if self.activation_half_depth <= 0.0 {
            return invalid("activation_half_depth", "must be positive");
        }
        if self.despawn_z <= self.activation_half_depth {
            return invalid("despawn_z", "must lie beyond the activation window");
        }
        if self.hit_margin < 0.0 {
            return invalid("hit_margin", "must not be negative");
        }
        if self.transition_duration < 0.0 {
            return invalid("transition_duration", "must not be negative");
        }
        if self.idle_timeout.is_some_and(|t| t <= 0.0) {
            return invalid("idle_timeout", "must be positive when set");
        }
        if self.event_queue_capacity == 0 {
            return invalid("event_queue_capacity", "must be non-zero");
        }
        Ok(())
    }

    /// Outermost lane index on either side of center
    #[inline]
    pub fn max_lane(&self) -> i8 {
        ((self.lane_count - 1) / 2) as i8
    }

    /// World x of a lane's center line
    #[inline]
    pub fn lane_x(&self, lane: i8) -> f32 {
        lane as f32 * self.lane_width
    }

    /// Normalized speed progress in [0, 1]
    pub fn speed_progress(&self, speed: f32) -> f32 {
        let span = self.speed_max - self.speed_start;
        if span <= 0.0 {
            return 1.0;
        }
        ((speed - self.speed_start) / span).clamp(0.0, 1.0)
    }

    /// Distance between spawn triggers at the given speed.
    ///
    /// Shrinks linearly from `obstacle_interval_max` at starting speed to
    /// `obstacle_interval_min` at maximum speed.
    pub fn spawn_interval(&self, speed: f32) -> f32 {
        let progress = self.speed_progress(speed);
        self.obstacle_interval_max
            - progress * (self.obstacle_interval_max - self.obstacle_interval_min)
    }
}
