//! Lane Runner headless entry point
//!
//! Runs the simulation with the demo autopilot at a fixed timestep and logs
//! session events.
//!
//! Usage:
//!   lane-runner                              # default tuning, in-memory best score
//!   lane-runner tuning.json best.json        # custom tuning, persistent best score
//!   lane-runner --seed 42 --seconds 300      # reproducible longer run

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use lane_runner::{
    Tuning,
    consts::SIM_DT,
    persistence::{JsonFileScoreStore, MemoryScoreStore, ScoreStore},
    sim::{GamePhase, Session, SessionEvent, TickInput, choose_intent, tick},
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "lane-runner")]
#[command(about = "Headless autopilot runs of the Lane Runner simulation")]
struct Cli {
    /// Tuning JSON file (missing fields take defaults)
    tuning: Option<PathBuf>,

    /// Best-score JSON file (kept in memory when omitted)
    best_score: Option<PathBuf>,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Lane Runner (headless) starting...");

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("Failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let store: Box<dyn ScoreStore> = match cli.best_score {
        Some(path) => {
            let store = JsonFileScoreStore::new(path);
            log::info!("Best score file: {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(MemoryScoreStore::new()),
    };

    let seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut session = Session::new(tuning, seed, store);
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    let mut runs = 0u32;
    let mut peak_progress = 0.0f32;

    let frames = (cli.seconds.max(0.0) / SIM_DT) as u32;
    for _ in 0..frames {
        if let Some(intent) = choose_intent(&session) {
            input.intents.push(intent);
        }
        if !input.is_empty() {
            log::trace!("Input: {:?}", input);
        }
        tick(&mut session, &input, SIM_DT);
        input = TickInput::default();
        peak_progress = peak_progress.max(session.speed_progress());

        for event in session.drain_events() {
            match event {
                SessionEvent::StateChanged(phase) => {
                    log::info!("State -> {}", phase.as_str());
                    if phase == GamePhase::GameOver {
                        runs += 1;
                    }
                }
                SessionEvent::ScoreUpdated { score, cause } => {
                    log::debug!("Score {} ({:?})", score, cause);
                }
            }
        }

        match session.phase() {
            GamePhase::GameOver => input.restart = true,
            GamePhase::Menu => input.start = true,
            _ => {}
        }
    }

    println!(
        "Seed {}: {} runs finished, final score {}, best {}, peak speed {:.0}%",
        seed,
        runs,
        session.score(),
        session.best_score(),
        peak_progress * 100.0
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web
}
