//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod player;
pub mod pool;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use aabb::Aabb;
pub use autopilot::choose_intent;
pub use collision::CollisionDetector;
pub use difficulty::SpeedModel;
pub use entity::{Entity, EntityKind, ObstacleKind};
pub use player::{Intent, Player, PlayerParams, VerticalState};
pub use pool::{EntityPool, EntityPools, PoolOutcome};
pub use session::Session;
pub use spawn::{ObstacleSpawn, SpawnDecision, SpawnScheduler};
pub use state::{EventQueue, GamePhase, ScoreCause, SessionEvent};
pub use tick::{TickInput, tick};
pub use timer::OneShotTimer;
pub use world::Ground;
