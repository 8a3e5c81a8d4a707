//! Per-frame driver
//!
//! Applies one frame's inbound signals to the session, then advances the
//! simulation. Signals are processed before the frame so a `start` and the
//! first transition step land on the same tick.

use super::player::Intent;
use super::session::Session;

/// Inbound signals for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the menu (tap to start)
    pub start: bool,
    /// Try again after a game over
    pub restart: bool,
    /// Abandon the run and show the title screen
    pub return_to_menu: bool,
    /// Movement intents, applied in order
    pub intents: Vec<Intent>,
}

impl TickInput {
    /// Input carrying a single movement intent
    pub fn intent(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.start && !self.restart && !self.return_to_menu && self.intents.is_empty()
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.return_to_menu {
        session.return_to_menu();
    }
    if input.start {
        session.start();
    }
    if input.restart {
        session.restart();
    }
    for &intent in &input.intents {
        session.handle_intent(intent);
    }

    session.advance(dt);
}
