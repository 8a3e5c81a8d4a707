//! Player motion controller
//!
//! The logical lane changes instantly; the visual x position eases toward
//! it. Jumping and rolling are mutually exclusive timed profiles driven by
//! the frame loop rather than an external tween engine.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::{IDLE_BREATH_PERIOD, ROLL_SQUASH_TIME};
use crate::tuning::Tuning;
use crate::{ease_in_out_sine, ease_in_quad, ease_out_quad, lerp};

/// Roll squash target (x stretch, y squash)
const ROLL_SCALE: Vec3 = Vec3::new(1.2, 0.5, 1.0);
/// Idle breathing extreme (x narrows, y stretches)
const IDLE_SCALE: Vec3 = Vec3::new(0.95, 1.05, 1.0);

/// Vertical motion state (exactly one at a time)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VerticalState {
    Grounded,
    /// Seconds since takeoff
    Jumping { elapsed: f32 },
    /// Seconds since the roll began
    Rolling { elapsed: f32 },
}

/// Movement intents resolved by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    Jump,
    Roll,
}

/// Cosmetic ease of the x position toward the current lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct LaneTween {
    from_x: f32,
    to_x: f32,
    elapsed: f32,
    duration: f32,
}

/// Motion parameters copied out of the tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerParams {
    pub lane_width: f32,
    pub max_lane: i8,
    pub lane_change_duration: f32,
    pub jump_duration: f32,
    pub jump_height: f32,
    pub roll_duration: f32,
    pub size: Vec3,
}

impl PlayerParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            lane_width: tuning.lane_width,
            max_lane: tuning.max_lane(),
            lane_change_duration: tuning.lane_change_duration,
            jump_duration: tuning.jump_duration,
            jump_height: tuning.jump_height,
            roll_duration: tuning.roll_duration,
            size: tuning.player_size,
        }
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Logical lane, always within `-max_lane..=max_lane`
    lane: i8,
    /// Visual anchor (feet). z stays at 0; the world moves instead.
    pub pos: Vec3,
    vertical: VerticalState,
    /// Visual squash/stretch applied about the feet
    pub scale: Vec3,
    lane_tween: Option<LaneTween>,
    /// Seconds into the breathing loop, when idling
    idle: Option<f32>,
    params: PlayerParams,
}

impl Player {
    pub fn new(params: PlayerParams) -> Self {
        Self {
            lane: 0,
            pos: Vec3::ZERO,
            vertical: VerticalState::Grounded,
            scale: Vec3::ONE,
            lane_tween: None,
            idle: None,
            params,
        }
    }

    #[inline]
    pub fn lane(&self) -> i8 {
        self.lane
    }

    #[inline]
    pub fn vertical(&self) -> VerticalState {
        self.vertical
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self.vertical, VerticalState::Jumping { .. })
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        matches!(self.vertical, VerticalState::Rolling { .. })
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.idle.is_some()
    }

    /// Snap back to the center lane on the ground
    pub fn reset(&mut self) {
        self.lane = 0;
        self.pos = Vec3::ZERO;
        self.vertical = VerticalState::Grounded;
        self.scale = Vec3::ONE;
        self.lane_tween = None;
    }

    /// Apply a movement intent. Returns false when the request was rejected.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Left => self.change_lane(-1),
            Intent::Right => self.change_lane(1),
            Intent::Jump => self.jump(),
            Intent::Roll => self.roll(),
        }
    }

    /// Move one lane left or right. Out-of-range requests are no-ops.
    pub fn change_lane(&mut self, delta: i8) -> bool {
        let target = self.lane.saturating_add(delta);
        if target.abs() > self.params.max_lane || delta == 0 {
            log::trace!("Lane change to {} rejected", target);
            return false;
        }
        self.lane = target;

        let to_x = target as f32 * self.params.lane_width;
        if self.params.lane_change_duration <= 0.0 {
            self.pos.x = to_x;
            self.lane_tween = None;
        } else {
            self.lane_tween = Some(LaneTween {
                from_x: self.pos.x,
                to_x,
                elapsed: 0.0,
                duration: self.params.lane_change_duration,
            });
        }
        true
    }

    /// Start a jump unless one is already in progress. Ends any roll.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping() {
            log::trace!("Jump rejected: already jumping");
            return false;
        }
        if self.is_rolling() {
            self.scale = Vec3::ONE;
        }
        self.vertical = VerticalState::Jumping { elapsed: 0.0 };
        true
    }

    /// Start a roll when neither rolling nor jumping
    pub fn roll(&mut self) -> bool {
        if !self.is_grounded() {
            log::trace!("Roll rejected: {:?}", self.vertical);
            return false;
        }
        self.vertical = VerticalState::Rolling { elapsed: 0.0 };
        true
    }

    /// Begin the breathing loop (runs until `stop_idle`)
    pub fn start_idle(&mut self) {
        if self.idle.is_none() {
            self.idle = Some(0.0);
        }
    }

    /// Cancel the breathing loop and return to rest scale immediately
    pub fn stop_idle(&mut self) {
        if self.idle.take().is_some() && !self.is_rolling() {
            self.scale = Vec3::ONE;
        }
    }

    /// Advance all motion profiles by `dt`
    pub fn update(&mut self, dt: f32) {
        self.update_lane(dt);
        self.update_vertical(dt);
        self.update_idle(dt);
    }

    fn update_lane(&mut self, dt: f32) {
        let Some(tween) = self.lane_tween.as_mut() else {
            return;
        };
        tween.elapsed += dt;
        let t = tween.elapsed / tween.duration;
        if t >= 1.0 {
            self.pos.x = tween.to_x;
            self.lane_tween = None;
        } else {
            self.pos.x = lerp(tween.from_x, tween.to_x, ease_out_quad(t));
        }
    }

    fn update_vertical(&mut self, dt: f32) {
        match self.vertical {
            VerticalState::Grounded => {}
            VerticalState::Jumping { elapsed } => {
                let elapsed = elapsed + dt;
                let duration = self.params.jump_duration;
                if profile_done(elapsed, duration) {
                    self.vertical = VerticalState::Grounded;
                    self.pos.y = 0.0;
                } else {
                    self.vertical = VerticalState::Jumping { elapsed };
                    self.pos.y = jump_height_at(elapsed, duration, self.params.jump_height);
                }
            }
            VerticalState::Rolling { elapsed } => {
                let elapsed = elapsed + dt;
                let duration = self.params.roll_duration;
                if profile_done(elapsed, duration) {
                    self.vertical = VerticalState::Grounded;
                    self.scale = Vec3::ONE;
                } else {
                    self.vertical = VerticalState::Rolling { elapsed };
                    self.scale = roll_scale_at(elapsed, duration);
                }
            }
        }
    }

    fn update_idle(&mut self, dt: f32) {
        let Some(elapsed) = self.idle.as_mut() else {
            return;
        };
        *elapsed += dt;
        let elapsed = *elapsed;
        if self.is_rolling() {
            return;
        }
        // Yoyo: 0 -> 1 -> 0 over two periods
        let phase = (elapsed / IDLE_BREATH_PERIOD) % 2.0;
        let k = if phase < 1.0 { phase } else { 2.0 - phase };
        self.scale = Vec3::ONE.lerp(IDLE_SCALE, ease_in_out_sine(k));
    }

    /// World-space visual extent (feet at `pos`, squash applied)
    pub fn visual_bounds(&self) -> Aabb {
        let size = self.params.size;
        let rest = Aabb::new(
            Vec3::new(-size.x * 0.5, 0.0, -size.z * 0.5),
            Vec3::new(size.x * 0.5, size.y, size.z * 0.5),
        );
        rest.scaled_about(Vec3::ZERO, self.scale).translated(self.pos)
    }
}

/// Slack for frame times that sum to just under a profile's duration
const PROFILE_EPSILON: f32 = 1.0e-4;

#[inline]
fn profile_done(elapsed: f32, duration: f32) -> bool {
    elapsed + PROFILE_EPSILON >= duration
}

/// Jump height at `elapsed`: ease out to the peak over the first half,
/// ease in back to the ground over the second.
pub fn jump_height_at(elapsed: f32, duration: f32, peak: f32) -> f32 {
    let half = duration * 0.5;
    if elapsed <= 0.0 || elapsed >= duration {
        0.0
    } else if elapsed < half {
        peak * ease_out_quad(elapsed / half)
    } else {
        peak * (1.0 - ease_in_quad((elapsed - half) / half))
    }
}

/// Squash profile: squash in, hold, spring back out at the end
fn roll_scale_at(elapsed: f32, duration: f32) -> Vec3 {
    let squash = ROLL_SQUASH_TIME.min(duration * 0.5);
    let k = if elapsed < squash {
        elapsed / squash
    } else if elapsed > duration - squash {
        (duration - elapsed) / squash
    } else {
        1.0
    };
    Vec3::ONE.lerp(ROLL_SCALE, k.clamp(0.0, 1.0))
}
