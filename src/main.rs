//! Flappy entry point
//!
//! Headless native driver: runs the simulation in demo mode at a fixed frame
//! rate, restarting after each crash, and prints the final snapshot as JSON.
//!
//! Usage: `flappy [config.json] [frames]`

use flappy::sim::{GameEvent, GameState, TickInput, tick};
use flappy::{RunPhase, SimConfig};

/// Frame time of the driver (vsync-like 60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Flappy (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut crashes = 0u32;
    let mut recycles = 0u32;
    let mut best_run = 0u64;

    for _ in 0..frames {
        // Restart one frame after a crash
        input.restart = state.phase == RunPhase::Ended;
        tick(&mut state, &input, FRAME_DT);

        for event in &state.events {
            match event {
                GameEvent::Crashed(_) => crashes += 1,
                GameEvent::Recycled { .. } => recycles += 1,
                _ => {}
            }
        }
        best_run = best_run.max(state.run_ticks);
    }

    log::info!(
        "{} frames: {} crashes, {} obstacles recycled, longest run {} ticks",
        frames,
        crashes,
        recycles,
        best_run
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

