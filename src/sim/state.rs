//! Game state and core simulation types
//!
//! One [`GameState`] owns everything a run mutates: the body, the fixed-size
//! obstacle set, the run phase and the recycle bookkeeping.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::recycler;
use crate::settings::{ConfigError, SimConfig};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Body hit something; everything is frozen until restart
    Ended,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Body overlapped the obstacle in this slot
    Obstacle { index: usize },
    /// Body reached the ground line
    Ground,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Recycled { index: usize, x: f32, gap_center_y: f32 },
    Crashed(CrashCause),
    Restarted,
    DebugToggled(bool),
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = down), applied once per tick
    pub velocity: f32,
    /// Collision size, fixed for the run
    pub size: Vec2,
}

impl Body {
    /// Body at its spawn point, at rest
    pub fn spawn(config: &SimConfig) -> Self {
        Self {
            pos: config.body_start,
            velocity: 0.0,
            size: config.body_size,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A pipe pair. Upper and lower pipe share the leading edge and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    /// Vertical middle of the opening
    pub gap_center_y: f32,
    /// Spawn sequence number; increases with every spawn in a run
    pub serial: u64,
}

/// Cosmetic scroll offsets (pixels, wrapped to sprite width)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffsets {
    pub background: f32,
    pub foreground: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: SimConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: RunPhase,
    pub body: Body,
    /// Exactly `config.obstacle_count` entries; slot indices are stable
    pub(crate) obstacles: Vec<Obstacle>,
    /// Slot of the most recently spawned obstacle
    pub(crate) last_spawned: usize,
    pub(crate) next_serial: u64,
    /// Read only by presentation
    pub debug: bool,
    pub scroll: ScrollOffsets,
    /// Ticks simulated in the current run
    pub run_ticks: u64,
    /// Restarts since the state was created
    pub runs: u32,
    /// Events from the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New state seeded from the system clock
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, time_seed())
    }

    /// New state with an explicit seed
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = Self {
            body: Body::spawn(&config),
            obstacles: Vec::with_capacity(config.obstacle_count),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Playing,
            last_spawned: 0,
            next_serial: 0,
            debug: false,
            scroll: ScrollOffsets::default(),
            run_ticks: 0,
            runs: 0,
            events: Vec::new(),
        };
        recycler::layout(&mut state);

        log::info!(
            "Run started (seed {}, {} obstacles)",
            seed,
            state.obstacles.len()
        );
        Ok(state)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Obstacles in slot order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Next random gap center for a spawn
    pub(crate) fn draw_gap_center(&mut self) -> f32 {
        recycler::draw_gap_center(&mut self.rng, &self.config)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RunPhase::Playing
    }

    /// Leading edge of the most recently spawned obstacle
    pub fn last_spawned_x(&self) -> f32 {
        self.obstacles[self.last_spawned].x
    }

    /// Allocate the next spawn sequence number
    pub(crate) fn next_serial(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }

    /// Obstacles ordered oldest spawn first (left to right)
    pub fn obstacles_in_spawn_order(&self) -> Vec<Obstacle> {
        let mut ordered = self.obstacles.clone();
        ordered.sort_by_key(|o| o.serial);
        ordered
    }

    /// Start a fresh run: body back at spawn, obstacles re-laid out, Playing.
    /// Debug flag and cosmetic scroll carry over.
    ///
    /// When called from `tick` the same tick goes on to integrate physics, so
    /// with `dt > 0` the body has already moved by the time the next snapshot
    /// is taken.
    pub fn restart(&mut self) {
        self.phase = RunPhase::Playing;
        self.body = Body::spawn(&self.config);
        self.run_ticks = 0;
        self.runs += 1;
        recycler::layout(self);
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted (run #{})", self.runs + 1);
    }

    /// End the run. Later calls keep the first cause.
    pub(crate) fn end_run(&mut self, cause: CrashCause) {
        if self.phase == RunPhase::Ended {
            return;
        }
        self.phase = RunPhase::Ended;
        self.events.push(GameEvent::Crashed(cause));
        log::info!(
            "Game over after {} ticks ({:?}, body y = {:.1})",
            self.run_ticks,
            cause,
            self.body.pos.y
        );
    }
}

/// Time-derived seed, taken once per state
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_playing() {
        let state = GameState::with_seed(SimConfig::default(), 1).unwrap();
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.obstacles.len(), 3);
        assert_eq!(state.body.pos, Vec2::new(75.0, 206.0));
        assert_eq!(state.body.velocity, 0.0);
        assert_eq!(state.body.size, Vec2::new(34.0, 24.0));
        assert!(!state.debug);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = SimConfig {
            obstacle_count: 0,
            ..Default::default()
        };
        assert!(GameState::with_seed(config, 1).is_err());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::with_seed(SimConfig::default(), 7).unwrap();
        state.body.pos.y = 380.0;
        state.body.velocity = 9.0;
        state.obstacles[0].x = -60.0;
        state.end_run(CrashCause::Ground);
        state.debug = true;

        state.restart();

        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.body, Body::spawn(state.config()));
        assert_eq!(state.run_ticks, 0);
        assert_eq!(state.runs, 1);
        assert!(state.debug);
        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![338.0, 528.0, 718.0]);
        assert_eq!(state.last_spawned_x(), 718.0);
        assert_eq!(state.events.last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_end_run_keeps_first_cause() {
        let mut state = GameState::with_seed(SimConfig::default(), 7).unwrap();
        state.end_run(CrashCause::Obstacle { index: 1 });
        state.end_run(CrashCause::Ground);
        assert_eq!(state.phase, RunPhase::Ended);
        assert_eq!(
            state.events,
            vec![GameEvent::Crashed(CrashCause::Obstacle { index: 1 })]
        );
    }

    #[test]
    fn test_obstacles_getter_is_slot_order() {
        let state = GameState::with_seed(SimConfig::default(), 3).unwrap();
        assert_eq!(state.obstacles().len(), 3);
        assert_eq!(state.obstacles()[2].x, state.last_spawned_x());
    }

    #[test]
    fn test_spawn_order_follows_serials() {
        let mut state = GameState::with_seed(SimConfig::default(), 3).unwrap();
        state.obstacles[0].serial = 10;
        let order: Vec<u64> = state
            .obstacles_in_spawn_order()
            .iter()
            .map(|o| o.serial)
            .collect();
        assert_eq!(order, vec![1, 2, 10]);
    }
}
