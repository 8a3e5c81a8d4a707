//! Game session state machine
//!
//! The session owns every simulation component and drives them once per
//! frame in a fixed order. Inbound signals (`start`, `restart`,
//! `return_to_menu`, movement intents) arrive as method calls; outbound
//! notifications leave through the event queue.
//!
//! Phase graph:
//! - Menu -> Transition on `start`
//! - Transition -> Playing when the transition timer completes
//! - Playing -> GameOver on the first obstacle hit
//! - GameOver -> Playing on `restart`
//! - Transition/Playing/GameOver -> Menu on `return_to_menu` or idle timeout

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::CollisionDetector;
use super::difficulty::SpeedModel;
use super::player::{Intent, Player, PlayerParams};
use super::pool::{EntityPools, PoolOutcome};
use super::spawn::{self, ObstacleSpawn, SpawnScheduler};
use super::state::{EventQueue, GamePhase, ScoreCause, SessionEvent};
use super::timer::OneShotTimer;
use super::world::Ground;
use crate::consts::{COIN_SCORE, OBSTACLE_PASSED_SCORE};
use crate::highscores::BestScore;
use crate::persistence::{MemoryScoreStore, ScoreStore};
use crate::tuning::Tuning;

/// One player's run loop, from title screen to game over and back
pub struct Session {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    score: u64,
    best: BestScore,
    store: Box<dyn ScoreStore>,

    player: Player,
    pools: EntityPools,
    scheduler: SpawnScheduler,
    detector: CollisionDetector,
    speed: SpeedModel,
    ground: Ground,

    transition: OneShotTimer,
    idle_timer: OneShotTimer,
    events: EventQueue,
    /// Total simulated seconds
    time: f64,
}

impl Session {
    /// Create a session in the Menu phase.
    ///
    /// The best score is read from `store` once; a failing store is logged
    /// and treated as an empty record.
    pub fn new(tuning: Tuning, seed: u64, mut store: Box<dyn ScoreStore>) -> Self {
        let best = store.load_best().unwrap_or_else(|e| {
            log::warn!("Could not read best score: {}", e);
            0
        });

        let mut session = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Menu,
            score: 0,
            best: BestScore::new(best),
            store,
            player: Player::new(PlayerParams::from_tuning(&tuning)),
            pools: EntityPools::new(tuning.obstacle_capacity, tuning.coin_capacity),
            scheduler: SpawnScheduler::new(),
            detector: CollisionDetector::from_tuning(&tuning),
            speed: SpeedModel::from_tuning(&tuning),
            ground: Ground::new(tuning.ground_segment_count, tuning.ground_segment_length),
            transition: OneShotTimer::new(),
            idle_timer: OneShotTimer::new(),
            events: EventQueue::new(tuning.event_queue_capacity),
            time: 0.0,
            tuning,
        };
        log::info!("Session created (seed {}, best {})", seed, best);
        session.enter_menu();
        session
    }

    /// Session with default tuning and an in-memory score store
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), seed, Box::new(MemoryScoreStore::new()))
    }

    // === Accessors ===

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn best_score(&self) -> u64 {
        self.best.best
    }

    pub fn best(&self) -> &BestScore {
        &self.best
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed.speed()
    }

    /// Normalized speed progress in [0, 1]
    pub fn speed_progress(&self) -> f32 {
        self.speed.progress()
    }

    /// Spawn interval at the current speed
    pub fn spawn_interval(&self) -> f32 {
        self.tuning.spawn_interval(self.speed.speed())
    }

    /// Ambient wind for the particle layer
    pub fn wind_speed(&self) -> f32 {
        if self.phase == GamePhase::Playing {
            self.speed.speed()
        } else {
            self.tuning.menu_wind_speed
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pools(&self) -> &EntityPools {
        &self.pools
    }

    /// Direct pool access for hosts that script encounters
    pub fn pools_mut(&mut self) -> &mut EntityPools {
        &mut self.pools
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    /// Fraction of the menu-to-play transition completed
    pub fn transition_progress(&self) -> f32 {
        match self.phase {
            GamePhase::Transition => self.transition.progress(),
            GamePhase::Playing | GamePhase::GameOver => 1.0,
            GamePhase::Menu => 0.0,
        }
    }

    /// Seconds until the idle timeout fires, if armed
    pub fn idle_remaining(&self) -> Option<f32> {
        self.idle_timer.is_armed().then(|| self.idle_timer.remaining())
    }

    /// Take every pending outbound event
    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain()
    }

    // === Inbound signals ===

    /// Leave the menu and begin the camera transition. Only valid in Menu.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.reset_run();
        self.transition.arm(self.tuning.transition_duration);
        self.set_phase(GamePhase::Transition);
        log::info!("Starting run (transition {:.2}s)", self.tuning.transition_duration);
        true
    }

    /// Jump straight back into a new run. Only valid in GameOver.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.reset_run();
        self.begin_playing();
        log::info!("Run restarted");
        true
    }

    /// Abandon the current run and go back to the title screen
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            return false;
        }
        self.transition.cancel();
        self.reset_run();
        self.enter_menu();
        log::info!("Returned to menu");
        true
    }

    /// Apply a movement intent. Ignored outside Playing.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.idle_timer.rearm();
        let accepted = self.player.apply(intent);
        if !accepted {
            log::debug!("{:?} rejected (lane {}, {:?})", intent, self.player.lane(), self.player.vertical());
        }
        accepted
    }

    /// End the run. Repeated calls in GameOver are no-ops.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.speed.stop();
        self.player.start_idle();

        if self.best.record(self.score) {
            if let Err(e) = self.store.save_best(self.score) {
                log::warn!("Failed to save best score {}: {}", self.score, e);
            }
        }
        log::info!("Game over: score {}, best {}", self.score, self.best.best);
        self.set_phase(GamePhase::GameOver);
    }

    /// Spawn an obstacle (with its guidance trail) `depth` units ahead
    pub fn spawn_obstacle(&mut self, depth: f32) -> Option<ObstacleSpawn> {
        spawn::spawn_obstacle(&mut self.pools, depth, &self.tuning, &mut self.rng)
    }

    /// Spawn a standalone coin `depth` units ahead
    pub fn spawn_coin(&mut self, depth: f32) -> Option<u32> {
        spawn::spawn_coin(&mut self.pools, depth, &self.tuning, &mut self.rng)
    }

    // === Frame update ===

    /// Advance the simulation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.time += dt as f64;

        match self.phase {
            GamePhase::Menu | GamePhase::GameOver => self.player.update(dt),
            GamePhase::Transition => {
                self.player.update(dt);
                if self.transition.tick(dt) {
                    self.begin_playing();
                }
            }
            GamePhase::Playing => self.advance_playing(dt),
        }

        if self.idle_timer.tick(dt)
            && matches!(self.phase, GamePhase::Playing | GamePhase::GameOver)
        {
            log::info!("Idle timeout in {:?}", self.phase);
            self.return_to_menu();
        }
    }

    /// One Playing frame: ground, spawning, pool + collisions, player, speed
    fn advance_playing(&mut self, dt: f32) {
        let speed = self.speed.speed();
        let distance = speed * dt;

        self.ground.advance(distance);

        if let Some(decision) =
            self.scheduler
                .update(distance, speed, &self.tuning, &mut self.pools, &mut self.rng)
        {
            log::trace!("Spawn trigger: {:?} at speed {:.1}", decision, speed);
        }

        let player_box = self.detector.player_box(self.player.visual_bounds());
        let outcome = self.pools.update(
            distance,
            dt,
            self.tuning.despawn_z,
            &player_box,
            &self.detector,
        );
        self.apply_outcome(outcome);

        self.player.update(dt);

        if self.phase == GamePhase::Playing {
            self.speed.advance(dt);
        }
    }

    fn apply_outcome(&mut self, outcome: PoolOutcome) {
        for _ in 0..outcome.coins_collected {
            self.add_score(COIN_SCORE, ScoreCause::Coin);
        }
        for _ in 0..outcome.obstacles_passed {
            self.add_score(OBSTACLE_PASSED_SCORE, ScoreCause::ObstaclePassed);
        }
        if outcome.obstacle_hit {
            self.game_over();
        }
    }

    // === Internals ===

    fn add_score(&mut self, amount: u64, cause: ScoreCause) {
        self.score += amount;
        self.events.push(SessionEvent::ScoreUpdated {
            score: self.score,
            cause,
        });
    }

    fn reset_score(&mut self) {
        self.score = 0;
        self.events.push(SessionEvent::ScoreUpdated {
            score: 0,
            cause: ScoreCause::Reset,
        });
    }

    /// Clear everything a run accumulates
    fn reset_run(&mut self) {
        self.pools.reset();
        self.scheduler.reset();
        self.ground.reset();
        self.player.reset();
        self.reset_score();
    }

    fn enter_menu(&mut self) {
        self.speed.stop();
        self.player.start_idle();
        self.set_phase(GamePhase::Menu);
    }

    fn begin_playing(&mut self) {
        self.scheduler.reset();
        if self.score != 0 {
            self.reset_score();
        }
        self.speed.launch();
        self.player.stop_idle();
        self.set_phase(GamePhase::Playing);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        match (phase, self.tuning.idle_timeout) {
            (GamePhase::Playing | GamePhase::GameOver, Some(timeout)) => self.idle_timer.arm(timeout),
            _ => self.idle_timer.cancel(),
        }
        self.events.push(SessionEvent::StateChanged(phase));
    }
}
