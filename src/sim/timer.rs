//! One-shot timers driven by the frame loop
//!
//! Used for the menu-to-play camera transition and the idle timeout. A timer
//! fires exactly once when its elapsed time reaches the duration, and can be
//! re-armed or cancelled at any point. Elapsed time accumulates in f64 so a
//! duration made of whole frames fires on its last frame.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OneShotTimer {
    duration: f64,
    elapsed: f64,
    armed: bool,
}

impl OneShotTimer {
    /// A disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start counting toward `duration` seconds
    pub fn arm(&mut self, duration: f32) {
        self.duration = duration as f64;
        self.elapsed = 0.0;
        self.armed = true;
    }

    /// Restart the countdown without changing the duration
    pub fn rearm(&mut self) {
        if self.armed {
            self.elapsed = 0.0;
        }
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds left before firing (0 when disarmed)
    pub fn remaining(&self) -> f32 {
        if self.armed {
            (self.duration - self.elapsed).max(0.0) as f32
        } else {
            0.0
        }
    }

    /// Fraction of the duration elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if !self.armed || self.duration <= 0.0 {
            return if self.armed { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Advance by `dt`. Returns true on the frame the timer completes,
    /// after which it is disarmed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed += dt as f64;
        if self.elapsed >= self.duration {
            self.armed = false;
            true
        } else {
            false
        }
    }
}
