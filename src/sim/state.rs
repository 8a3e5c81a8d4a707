//! Session phases and outbound events
//!
//! The session talks to the presentation layer only through [`SessionEvent`]s
//! pushed into a bounded queue that the UI drains once per frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, world stopped, player breathing
    Menu,
    /// Camera moving into the runner view (fixed duration)
    Transition,
    /// Active gameplay
    Playing,
    /// Run ended, statistics frozen
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "MENU",
            GamePhase::Transition => "TRANSITION",
            GamePhase::Playing => "PLAYING",
            GamePhase::GameOver => "GAMEOVER",
        }
    }
}

/// Why the score changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCause {
    /// Coin picked up
    Coin,
    /// Obstacle dodged and left behind
    ObstaclePassed,
    /// Score cleared for a new run or the menu
    Reset,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    StateChanged(GamePhase),
    ScoreUpdated { score: u64, cause: ScoreCause },
}

/// Bounded FIFO of outbound events.
///
/// When full, the oldest event is discarded so the latest state always
/// reaches the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventQueue {
    events: VecDeque<SessionEvent>,
    capacity: usize,
    /// Events discarded due to overflow since creation
    dropped: u64,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            self.dropped += 1;
            log::warn!("Event queue full ({}), dropped oldest event", self.capacity);
        }
        self.events.push_back(event);
    }

    /// Take every pending event in order
    pub fn drain(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
