//! End-to-end session scenarios driven through the public API

use glam::Vec3;
use lane_runner::Tuning;
use lane_runner::consts::SIM_DT;
use lane_runner::persistence::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
use lane_runner::sim::{
    EntityKind, GamePhase, Intent, ObstacleKind, ScoreCause, Session, SessionEvent, TickInput,
    choose_intent, tick,
};

/// No scheduled spawns and no idle timeout
fn quiet_tuning() -> Tuning {
    Tuning {
        obstacle_interval_max: 1.0e9,
        obstacle_interval_min: 1.0e9,
        idle_timeout: None,
        ..Default::default()
    }
}

fn frames(seconds: f32) -> u32 {
    (seconds / SIM_DT).round() as u32
}

fn run(session: &mut Session, seconds: f32) {
    for _ in 0..frames(seconds) {
        session.advance(SIM_DT);
    }
}

/// Session already in Playing with its event queue drained
fn playing(tuning: Tuning, seed: u64) -> Session {
    let mut session = Session::new(tuning, seed, Box::new(MemoryScoreStore::new()));
    session.start();
    while session.phase() == GamePhase::Transition {
        session.advance(SIM_DT);
    }
    assert_eq!(session.phase(), GamePhase::Playing);
    session.drain_events().for_each(drop);
    session
}

#[test]
fn speed_reaches_max_after_ninety_seconds() {
    // Coins only, so nothing can end the run
    let tuning = Tuning {
        obstacle_chance: 0.0,
        idle_timeout: None,
        ..Default::default()
    };
    let mut session = playing(tuning, 7);
    assert_eq!(session.speed(), 15.0);

    let mut last = session.speed();
    for _ in 0..frames(90.0) {
        session.advance(SIM_DT);
        assert!(session.speed() >= last);
        assert!(session.speed() <= 42.0);
        last = session.speed();
    }

    assert_eq!(session.phase(), GamePhase::Playing);
    assert!((session.speed() - 42.0).abs() < 1e-4);

    run(&mut session, 5.0);
    assert_eq!(session.speed(), 42.0);
}

#[test]
fn spawn_interval_tracks_speed_progress() {
    let tuning = Tuning::default();
    assert_eq!(tuning.spawn_interval(tuning.speed_start), 15.0);
    assert_eq!(tuning.spawn_interval(tuning.speed_max), 8.0);
    let half = (tuning.speed_start + tuning.speed_max) * 0.5;
    assert!((tuning.spawn_interval(half) - 11.5).abs() < 1e-5);

    let session = playing(quiet_tuning(), 1);
    assert_eq!(session.spawn_interval(), session.tuning().obstacle_interval_max);
}

#[test]
fn second_left_at_edge_is_a_no_op() {
    let mut session = playing(quiet_tuning(), 3);
    assert_eq!(session.player().lane(), 0);

    assert!(session.handle_intent(Intent::Left));
    assert_eq!(session.player().lane(), -1);
    run(&mut session, 0.3);

    assert!(!session.handle_intent(Intent::Left));
    assert_eq!(session.player().lane(), -1);
    run(&mut session, 0.3);
    assert!((session.player().pos.x + 2.0).abs() < 1e-4);
}

#[test]
fn dodged_obstacle_from_depth_sixty_scores_ten() {
    for seed in 1..=8 {
        let mut session = playing(quiet_tuning(), seed);
        let spawn = session.spawn_obstacle(60.0).unwrap();
        assert_eq!(session.pools().obstacles.get(spawn.id).unwrap().pos.z, -60.0);

        // Only the obstacle should be able to score
        session.pools_mut().coins.reset();
        if spawn.lane == session.player().lane() {
            assert!(session.handle_intent(Intent::Right));
        }
        session.drain_events().for_each(drop);

        // 70 units at ~15 units/s
        run(&mut session, 6.0);
        assert_eq!(session.phase(), GamePhase::Playing, "seed {seed}");
        assert_eq!(session.score(), 10, "seed {seed}");
        assert_eq!(session.pools().obstacles.active_count(), 0);

        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(
            events,
            vec![SessionEvent::ScoreUpdated {
                score: 10,
                cause: ScoreCause::ObstaclePassed
            }],
            "seed {seed}"
        );
    }
}

#[test]
fn transition_lasts_exactly_its_duration_in_frames() {
    let mut session = Session::new(quiet_tuning(), 4, Box::new(MemoryScoreStore::new()));
    session.start();
    for _ in 0..89 {
        session.advance(SIM_DT);
    }
    assert_eq!(session.phase(), GamePhase::Transition);
    session.advance(SIM_DT);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn invalid_spawn_distance_is_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tuning.json");
    std::fs::write(&path, r#"{ "spawn_distance": -20.0 }"#).unwrap();
    assert!(Tuning::load(&path).is_err());
}

#[test]
fn coin_pickup_scores_fifty_and_deactivates_coin() {
    let mut session = playing(quiet_tuning(), 12);
    let id = {
        let coin = session.pools_mut().coins.claim().unwrap();
        coin.lane = 0;
        coin.pos = Vec3::new(0.0, 1.0, -20.0);
        coin.id
    };

    run(&mut session, 2.0);
    assert_eq!(session.score(), 50);
    assert!(!session.pools().coins.get(id).unwrap().active);

    let events: Vec<_> = session.drain_events().collect();
    assert_eq!(
        events,
        vec![SessionEvent::ScoreUpdated {
            score: 50,
            cause: ScoreCause::Coin
        }]
    );
}

#[test]
fn jump_blocks_jump_and_roll_until_it_lands() {
    let mut session = playing(quiet_tuning(), 5);
    assert!(session.handle_intent(Intent::Jump));
    run(&mut session, 0.1);

    assert!(!session.handle_intent(Intent::Jump));
    assert!(!session.handle_intent(Intent::Roll));
    assert!(session.player().is_jumping());

    run(&mut session, 0.6);
    assert!(session.player().is_grounded());
    assert!(session.handle_intent(Intent::Roll));
    assert!(session.player().is_rolling());
}

#[test]
fn standing_in_front_of_obstacle_ends_the_run() {
    let mut session = playing(quiet_tuning(), 9);
    session.pools_mut().coins.claim().unwrap().pos = Vec3::new(0.0, 1.0, -5.0);
    {
        let obstacle = session.pools_mut().obstacles.claim().unwrap();
        obstacle.kind = EntityKind::Obstacle(ObstacleKind::Jump);
        obstacle.hitbox = ObstacleKind::Jump.hitbox();
        obstacle.pos = Vec3::new(0.0, 0.0, -10.0);
    }

    run(&mut session, 1.5);
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.score(), 50);
    assert_eq!(session.best_score(), 50);
    assert_eq!(session.speed(), 0.0);
    assert!(session.player().is_idle());

    let events: Vec<_> = session.drain_events().collect();
    assert_eq!(events.last(), Some(&SessionEvent::StateChanged(GamePhase::GameOver)));
}

#[test]
fn full_session_flow_through_tick() {
    let mut session = Session::new(quiet_tuning(), 21, Box::new(MemoryScoreStore::new()));
    let idle = TickInput::default();

    tick(&mut session, &TickInput { start: true, ..Default::default() }, SIM_DT);
    assert_eq!(session.phase(), GamePhase::Transition);
    for _ in 0..frames(1.6) {
        tick(&mut session, &idle, SIM_DT);
    }
    assert_eq!(session.phase(), GamePhase::Playing);

    session.game_over();
    tick(&mut session, &TickInput { restart: true, ..Default::default() }, SIM_DT);
    assert_eq!(session.phase(), GamePhase::Playing);

    tick(&mut session, &TickInput { return_to_menu: true, ..Default::default() }, SIM_DT);
    assert_eq!(session.phase(), GamePhase::Menu);
    assert_eq!(session.speed(), 0.0);

    let phases: Vec<GamePhase> = session
        .drain_events()
        .filter_map(|e| match e {
            SessionEvent::StateChanged(phase) => Some(phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            GamePhase::Menu,
            GamePhase::Transition,
            GamePhase::Playing,
            GamePhase::GameOver,
            GamePhase::Playing,
            GamePhase::Menu,
        ]
    );
}

#[test]
fn best_score_survives_across_sessions_in_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");

    let mut session = Session::new(quiet_tuning(), 1, Box::new(JsonFileScoreStore::new(&path)));
    session.start();
    run(&mut session, 1.6);
    session.pools_mut().coins.claim().unwrap().pos = Vec3::new(0.0, 1.0, -5.0);
    run(&mut session, 1.0);
    session.game_over();
    assert_eq!(session.best_score(), 50);

    let session = Session::new(quiet_tuning(), 2, Box::new(JsonFileScoreStore::new(&path)));
    assert_eq!(session.best_score(), 50);
    assert_eq!(JsonFileScoreStore::new(&path).load_best().unwrap(), 50);
}

#[test]
fn autopilot_survives_early_game() {
    let tuning = Tuning {
        idle_timeout: None,
        ..Default::default()
    };
    for seed in 1..=4 {
        let mut session = playing(tuning.clone(), seed);
        for _ in 0..frames(15.0) {
            if let Some(intent) = choose_intent(&session) {
                session.handle_intent(intent);
            }
            session.advance(SIM_DT);
        }
        assert_eq!(session.phase(), GamePhase::Playing, "seed {seed}");
        assert!(session.score() > 0, "seed {seed}");
    }
}
