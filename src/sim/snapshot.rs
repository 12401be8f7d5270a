//! Read-only view of the simulation for presentation
//!
//! A snapshot is a value copy taken after a tick; the renderer never touches
//! the live [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::obstacle_boxes;
use super::rect::Rect;
use super::state::{Body, GameState, RunPhase, ScrollOffsets};

/// One obstacle as presentation sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_center_y: f32,
    pub upper: Rect,
    pub lower: Rect,
}

/// Everything presentation may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub debug: bool,
    pub run_ticks: u64,
    pub body: Body,
    /// Oldest spawn first, which is left to right
    pub obstacles: Vec<ObstacleView>,
    pub obstacle_size: Vec2,
    pub visible_size: Vec2,
    pub ground_y: f32,
    pub scroll: ScrollOffsets,
}

impl GameState {
    /// Copy out the presentation view of the current state
    pub fn snapshot(&self) -> Snapshot {
        let config = self.config();
        let obstacles = self
            .obstacles_in_spawn_order()
            .iter()
            .map(|o| {
                let (upper, lower) = obstacle_boxes(o, config);
                ObstacleView {
                    x: o.x,
                    gap_center_y: o.gap_center_y,
                    upper,
                    lower,
                }
            })
            .collect();

        Snapshot {
            phase: self.phase,
            debug: self.debug,
            run_ticks: self.run_ticks,
            body: self.body,
            obstacles,
            obstacle_size: config.obstacle_size,
            visible_size: config.visible_size,
            ground_y: config.ground_y(),
            scroll: self.scroll,
        }
    }
}
