//! Simulation core
//!
//! All gameplay logic lives here. Nothing in this module draws, loads assets
//! or reads devices:
//! - Elapsed time and input events come in through [`tick`]
//! - Presentation reads a [`Snapshot`] taken after the tick
//! - Randomness comes from the state's own seeded RNG

pub mod collision;
pub mod physics;
pub mod rect;
pub mod recycler;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{body_box, find_crash, obstacle_boxes};
pub use rect::Rect;
pub use snapshot::{ObstacleView, Snapshot};
pub use state::{Body, CrashCause, GameEvent, GameState, Obstacle, RunPhase, ScrollOffsets};
pub use tick::{TickInput, tick};
