//! Speed progression
//!
//! Speed ramps linearly with time spent Playing and is clamped at the
//! maximum. It is computed from accumulated Playing time rather than summed
//! per frame, so it never drifts past the clamp and never decreases.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedModel {
    start: f32,
    max: f32,
    ramp: f32,
    /// Seconds of Playing since the last reset
    playing_time: f64,
    /// Current speed (0 while stopped)
    speed: f32,
}

impl SpeedModel {
    pub fn new(start: f32, max: f32, ramp: f32) -> Self {
        Self {
            start,
            max,
            ramp,
            playing_time: 0.0,
            speed: 0.0,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.speed_start, tuning.speed_max, tuning.speed_ramp)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Normalized progress of the current speed between start and max
    pub fn progress(&self) -> f32 {
        let span = self.max - self.start;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.speed - self.start) / span).clamp(0.0, 1.0)
    }

    /// Halt the world (Menu, Transition, GameOver)
    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// Begin a run at the starting speed
    pub fn launch(&mut self) {
        self.playing_time = 0.0;
        self.speed = self.start;
    }

    /// Advance the ramp by `dt` seconds of Playing
    pub fn advance(&mut self, dt: f32) {
        self.playing_time += dt as f64;
        let ramped = self.start as f64 + self.ramp as f64 * self.playing_time;
        self.speed = ramped.min(self.max as f64) as f32;
    }
}
