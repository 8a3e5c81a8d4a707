//! Best-score bookkeeping
//!
//! Tracks the best score seen so far and whether a finished run beats it.
//! Storage is handled by [`crate::persistence::ScoreStore`].

use serde::{Deserialize, Serialize};

/// Best score plus a little per-process run history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestScore {
    /// Highest score achieved
    pub best: u64,
    /// Runs finished since startup
    pub runs: u32,
    /// Score of the most recent finished run
    pub last: Option<u64>,
}

impl BestScore {
    pub fn new(best: u64) -> Self {
        Self {
            best,
            runs: 0,
            last: None,
        }
    }

    /// A zero score never qualifies; otherwise it must strictly beat the best
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && score > self.best
    }

    /// Record a finished run. Returns true when it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        self.runs += 1;
        self.last = Some(score);
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }
}
