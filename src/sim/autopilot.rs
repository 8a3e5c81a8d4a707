//! Demo autopilot
//!
//! Plays the game for attract mode and headless runs. Looks at the nearest
//! obstacle approaching in the player's lane and answers with the action
//! that clears it, timed so the player is mid-jump or mid-roll when the
//! obstacle arrives.

use super::entity::{Entity, ObstacleKind};
use super::player::Intent;
use super::session::Session;
use super::state::GamePhase;

/// How many seconds ahead the autopilot starts reacting to Full blockers
const LANE_CHANGE_LOOKAHEAD: f32 = 1.0;

/// Nearest obstacle in `lane` that has not yet passed the player
fn nearest_in_lane<'a>(obstacles: impl Iterator<Item = &'a Entity>, lane: i8) -> Option<&'a Entity> {
    obstacles
        .filter(|e| e.lane == lane && e.pos.z < 0.5)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
}

/// Pick the intent (if any) the autopilot would send this frame
pub fn choose_intent(session: &Session) -> Option<Intent> {
    if session.phase() != GamePhase::Playing {
        return None;
    }
    let player = session.player();
    if !player.is_grounded() {
        return None;
    }

    let speed = session.speed().max(f32::EPSILON);
    let tuning = session.tuning();
    let lane = player.lane();
    let threat = nearest_in_lane(session.pools().obstacles.iter_active(), lane)?;
    let distance = threat.depth();
    // Seconds until the obstacle reaches the player
    let eta = distance / speed;

    match threat.obstacle_kind()? {
        ObstacleKind::Jump if eta <= tuning.jump_duration * 0.5 => Some(Intent::Jump),
        ObstacleKind::Roll if eta <= tuning.roll_duration * 0.5 => Some(Intent::Roll),
        ObstacleKind::Full if eta <= LANE_CHANGE_LOOKAHEAD => {
            safe_side(session, lane, eta).map(|delta| if delta < 0 { Intent::Left } else { Intent::Right })
        }
        _ => None,
    }
}

/// Direction (-1/+1) of the neighbouring lane whose next obstacle is
/// furthest away, preferring the center.
fn safe_side(session: &Session, lane: i8, eta: f32) -> Option<i8> {
    let max_lane = session.tuning().max_lane();
    let speed = session.speed().max(f32::EPSILON);

    let mut candidates: Vec<i8> = [-1i8, 1]
        .into_iter()
        .filter(|d| (lane + d).abs() <= max_lane)
        .collect();
    // Toward the center first
    candidates.sort_by_key(|d| (lane + d).abs());

    candidates
        .into_iter()
        .map(|d| {
            let clear_for = nearest_in_lane(session.pools().obstacles.iter_active(), lane + d)
                .map(|e| e.depth() / speed)
                .unwrap_or(f32::INFINITY);
            (d, clear_for)
        })
        // A Full blocker next door arriving at the same time is no escape
        .filter(|&(_, clear_for)| clear_for > eta + 0.3)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryScoreStore;
    use crate::sim::entity::EntityKind;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn playing_session() -> Session {
        let tuning = Tuning {
            obstacle_interval_max: 1.0e9,
            obstacle_interval_min: 1.0e9,
            idle_timeout: None,
            ..Default::default()
        };
        let mut s = Session::new(tuning, 5, Box::new(MemoryScoreStore::new()));
        s.start();
        for _ in 0..100 {
            s.advance(SIM_DT);
        }
        s
    }

    fn place(s: &mut Session, kind: ObstacleKind, lane: i8, z: f32) {
        let lane_width = s.tuning().lane_width;
        let obstacle = s.pools_mut().obstacles.claim().unwrap();
        obstacle.kind = EntityKind::Obstacle(kind);
        obstacle.hitbox = kind.hitbox();
        obstacle.lane = lane;
        obstacle.pos = Vec3::new(lane as f32 * lane_width, 0.0, z);
    }

    fn drive(s: &mut Session, seconds: f32) {
        for _ in 0..(seconds / SIM_DT) as u32 {
            if let Some(intent) = choose_intent(s) {
                s.handle_intent(intent);
            }
            s.advance(SIM_DT);
        }
    }

    #[test]
    fn test_no_intent_outside_playing() {
        let s = Session::with_seed(1);
        assert_eq!(choose_intent(&s), None);
    }

    #[test]
    fn test_clears_each_obstacle_kind() {
        for kind in ObstacleKind::ALL {
            let mut s = playing_session();
            place(&mut s, kind, 0, -30.0);
            drive(&mut s, 4.0);
            assert_eq!(s.phase(), GamePhase::Playing, "{kind:?}");
            assert_eq!(s.score(), 10, "{kind:?}");
        }
    }

    #[test]
    fn test_avoids_blocked_neighbour() {
        let mut s = playing_session();
        place(&mut s, ObstacleKind::Full, 0, -12.0);
        place(&mut s, ObstacleKind::Full, -1, -12.0);
        drive(&mut s, 3.0);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.player().lane(), 1);
    }
}
