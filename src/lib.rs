//! Flappy - a side-scrolling flap-and-dodge game
//!
//! Core modules:
//! - `sim`: Simulation core (body physics, obstacle recycling, collisions, run state)
//! - `settings`: Run configuration, JSON loading and validation
//! - `view`: Presentation helpers (letterbox fit, draw list from a snapshot)

pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{ConfigError, SimConfig};
pub use sim::{GameState, RunPhase, Snapshot, TickInput, tick};

/// Reference configuration constants
pub mod consts {
    /// Virtual screen dimensions (the background sprite size)
    pub const SCREEN_WIDTH: f32 = 288.0;
    pub const SCREEN_HEIGHT: f32 = 512.0;

    /// Obstacle scroll speed (pixels/s)
    pub const SCROLL_SPEED: f32 = 110.0;
    /// Background scrolls slower than the foreground for parallax
    pub const BACKGROUND_SCROLL_FACTOR: f32 = 0.4;

    /// Obstacles alive at once
    pub const PIPE_TOTAL: usize = 3;
    /// Half-height of the opening between upper and lower pipe
    pub const PIPE_GAP: f32 = 40.0;
    /// Horizontal distance between consecutive pipes
    pub const PIPE_SPACE: f32 = 190.0;
    /// First pipe spawns this far past the right edge
    pub const PIPE_SPAWN_OFFSET: f32 = 50.0;
    /// Gap center is drawn from [TOP, screen - foreground - BOTTOM]
    pub const GAP_CENTER_TOP_MARGIN: f32 = 150.0;
    pub const GAP_CENTER_BOTTOM_MARGIN: f32 = 40.0;

    /// Gravity (velocity units/s). Velocity is applied per tick, not per second.
    pub const BIRD_GRAVITY: f32 = 20.0;
    /// Upward velocity set by a jump
    pub const BIRD_JUMP: f32 = 5.0;
    /// Body spawn x
    pub const BIRD_START_X: f32 = 75.0;
    /// Body spawn y sits this far above the vertical middle
    pub const BIRD_START_LIFT: f32 = 50.0;
    /// Ceiling clamp in multiples of the body height above y = 0
    pub const CEILING_FACTOR: f32 = 1.5;

    /// Sprite pixel sizes
    pub const BIRD_SIZE: (f32, f32) = (34.0, 24.0);
    pub const PIPE_SIZE: (f32, f32) = (52.0, 320.0);
    pub const FOREGROUND_WIDTH: f32 = 336.0;
    pub const FOREGROUND_HEIGHT: f32 = 112.0;
}
