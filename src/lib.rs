//! Lane Runner - simulation core for a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pool, spawning, collisions, player, session)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-score bookkeeping
//! - `persistence`: Best-score storage boundary

pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use highscores::BestScore;
pub use tuning::{Tuning, TuningError};

/// Default tuning values
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World dimensions
    pub const LANE_WIDTH: f32 = 2.0;
    pub const LANE_COUNT: u8 = 3;

    /// Player motion
    pub const LANE_CHANGE_DURATION: f32 = 0.2;
    pub const JUMP_DURATION: f32 = 0.6;
    pub const JUMP_HEIGHT: f32 = 1.7;
    pub const ROLL_DURATION: f32 = 0.6;
    /// Time spent squashing down (and springing back up) at each end of a roll
    pub const ROLL_SQUASH_TIME: f32 = 0.15;
    /// Half-period of the idle breathing loop
    pub const IDLE_BREATH_PERIOD: f32 = 1.0;

    /// Player visual extent at rest (width, height, depth)
    pub const PLAYER_WIDTH: f32 = 0.7;
    pub const PLAYER_HEIGHT: f32 = 1.625;
    pub const PLAYER_DEPTH: f32 = 0.66;

    /// Speed progression (units/sec, units/sec²)
    pub const GAME_SPEED_START: f32 = 15.0;
    pub const GAME_SPEED_MAX: f32 = 42.0;
    pub const GAME_SPEED_RAMP: f32 = 0.3;

    /// Spawning (distance units)
    pub const SPAWN_DISTANCE: f32 = 60.0;
    pub const OBSTACLE_INTERVAL: f32 = 15.0;
    pub const OBSTACLE_INTERVAL_MIN: f32 = 8.0;
    /// Probability that a spawn trigger places an obstacle rather than a lone coin
    pub const OBSTACLE_CHANCE: f32 = 0.7;
    /// Depth spacing between coins of a guidance trail
    pub const GUIDANCE_SPACING: f32 = 4.0;
    /// Resting height of a standalone coin
    pub const COIN_HEIGHT: f32 = 1.0;
    /// Coin spin rate (radians/sec, visual only)
    pub const COIN_SPIN_RATE: f32 = 4.0;

    /// Pool capacities
    pub const OBSTACLE_POOL_SIZE: usize = 20;
    pub const COIN_POOL_SIZE: usize = 60;

    /// Collision
    pub const ACTIVATION_HALF_DEPTH: f32 = 2.0;
    pub const DESPAWN_Z: f32 = 10.0;
    pub const HIT_MARGIN: f32 = 0.15;
    /// Where recycled entities are parked
    pub const OFF_WORLD_Y: f32 = -100.0;

    /// Scoring
    pub const COIN_SCORE: u64 = 50;
    pub const OBSTACLE_PASSED_SCORE: u64 = 10;

    /// Ground
    pub const GROUND_SEGMENT_LENGTH: f32 = 50.0;
    pub const GROUND_SEGMENT_COUNT: usize = 3;

    /// Session timing
    pub const TRANSITION_DURATION: f32 = 1.5;
    pub const IDLE_TIMEOUT: f32 = 30.0;
    pub const EVENT_QUEUE_CAPACITY: usize = 64;
    /// Wind speed for the ambient particle layer outside of Playing
    pub const MENU_WIND_SPEED: f32 = 2.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-out (fast start, soft landing)
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in (soft start, fast finish)
#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Sine ease-in-out over [0, 1]
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    -((std::f32::consts::PI * t).cos() - 1.0) / 2.0
}
