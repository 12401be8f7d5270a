//! Run configuration
//!
//! Every tunable the simulation reads lives in [`SimConfig`]. The config is
//! constant for a run and validated once up front; an invalid config is a
//! programming error and is rejected before any state is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration rejected at load or initialization time
#[derive(Debug)]
pub enum ConfigError {
    /// A numeric field is out of range
    InvalidValue {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
    /// No obstacles configured
    NoObstacles,
    /// Gap-center range collapsed (min above max)
    EmptyGapRange { min: f32, max: f32 },
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid JSON for [`SimConfig`]
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "invalid `{}` ({}): {}", field, value, reason),
            ConfigError::NoObstacles => write!(f, "obstacle_count must be at least 1"),
            ConfigError::EmptyGapRange { min, max } => {
                write!(f, "gap center range is empty: [{}, {}]", min, max)
            }
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Simulation configuration (constant for a run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Physics ===
    /// Downward acceleration of the body's velocity (per second)
    pub gravity: f32,
    /// Velocity magnitude set (upward) by a jump
    pub jump_impulse: f32,

    // === Obstacles ===
    /// Leftward obstacle speed (pixels/s)
    pub scroll_speed: f32,
    /// Distance between consecutive obstacles' leading edges
    pub pipe_space: f32,
    /// Distance from gap center to each pipe's inner edge
    pub gap: f32,
    /// Number of obstacles alive at once
    pub obstacle_count: usize,
    /// Distance past the right edge where the first obstacle spawns
    pub spawn_offset: f32,
    /// Gap centers are drawn from [top_margin, ground_line - bottom_margin]
    pub gap_center_top_margin: f32,
    pub gap_center_bottom_margin: f32,

    // === Geometry ===
    /// Visible area (virtual screen) size
    pub visible_size: Vec2,
    /// Body collision size (from the body sprite)
    pub body_size: Vec2,
    /// Per-pipe collision size (from the obstacle sprite)
    pub obstacle_size: Vec2,
    /// Height of the foreground strip; its top edge is the ground line
    pub foreground_height: f32,
    /// Body spawn position
    pub body_start: Vec2,

    // === Cosmetic scroll ===
    /// Background sprite width; background scroll wraps here
    pub background_width: f32,
    /// Foreground sprite width; foreground scroll wraps here
    pub foreground_width: f32,
    /// Background speed as a fraction of `scroll_speed`
    pub background_scroll_factor: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: BIRD_GRAVITY,
            jump_impulse: BIRD_JUMP,

            scroll_speed: SCROLL_SPEED,
            pipe_space: PIPE_SPACE,
            gap: PIPE_GAP,
            obstacle_count: PIPE_TOTAL,
            spawn_offset: PIPE_SPAWN_OFFSET,
            gap_center_top_margin: GAP_CENTER_TOP_MARGIN,
            gap_center_bottom_margin: GAP_CENTER_BOTTOM_MARGIN,

            visible_size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            body_size: Vec2::new(BIRD_SIZE.0, BIRD_SIZE.1),
            obstacle_size: Vec2::new(PIPE_SIZE.0, PIPE_SIZE.1),
            foreground_height: FOREGROUND_HEIGHT,
            body_start: Vec2::new(BIRD_START_X, SCREEN_HEIGHT * 0.5 - BIRD_START_LIFT),

            background_width: SCREEN_WIDTH,
            foreground_width: FOREGROUND_WIDTH,
            background_scroll_factor: BACKGROUND_SCROLL_FACTOR,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Y coordinate of the ground line (top of the foreground strip)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.visible_size.y - self.foreground_height
    }

    /// Highest point the body may reach (negative: above the visible area)
    #[inline]
    pub fn ceiling_y(&self) -> f32 {
        self.body_size.y * -CEILING_FACTOR
    }

    /// Inclusive range gap centers are drawn from
    #[inline]
    pub fn gap_center_range(&self) -> (f32, f32) {
        (
            self.gap_center_top_margin,
            self.ground_y() - self.gap_center_bottom_margin,
        )
    }

    /// Leading edge of the first obstacle after a restart
    #[inline]
    pub fn first_spawn_x(&self) -> f32 {
        self.visible_size.x + self.spawn_offset
    }

    /// Check every field; the first violation wins
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    value,
                    reason: "must be positive and finite",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    value,
                    reason: "must be non-negative and finite",
                })
            }
        }

        if self.obstacle_count == 0 {
            return Err(ConfigError::NoObstacles);
        }

        positive("gravity", self.gravity)?;
        positive("jump_impulse", self.jump_impulse)?;
        positive("scroll_speed", self.scroll_speed)?;
        positive("pipe_space", self.pipe_space)?;
        non_negative("gap", self.gap)?;
        non_negative("spawn_offset", self.spawn_offset)?;
        positive("visible_size.x", self.visible_size.x)?;
        positive("visible_size.y", self.visible_size.y)?;
        positive("body_size.x", self.body_size.x)?;
        positive("body_size.y", self.body_size.y)?;
        positive("obstacle_size.x", self.obstacle_size.x)?;
        positive("obstacle_size.y", self.obstacle_size.y)?;
        non_negative("foreground_height", self.foreground_height)?;
        positive("background_width", self.background_width)?;
        positive("foreground_width", self.foreground_width)?;
        non_negative("background_scroll_factor", self.background_scroll_factor)?;

        if !self.body_start.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "body_start",
                value: self.body_start.y,
                reason: "must be finite",
            });
        }

        if self.foreground_height >= self.visible_size.y {
            return Err(ConfigError::InvalidValue {
                field: "foreground_height",
                value: self.foreground_height,
                reason: "must be less than the visible height",
            });
        }

        if self.gap * 2.0 >= self.visible_size.y {
            return Err(ConfigError::InvalidValue {
                field: "gap",
                value: self.gap,
                reason: "opening must fit inside the visible height",
            });
        }

        // Obstacles may not overlap each other
        if self.pipe_space < self.obstacle_size.x {
            return Err(ConfigError::InvalidValue {
                field: "pipe_space",
                value: self.pipe_space,
                reason: "must be at least the obstacle width",
            });
        }

        let (min, max) = self.gap_center_range();
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(ConfigError::EmptyGapRange { min, max });
        }

        Ok(())
    }
}
