//! Collision detection
//!
//! Each obstacle contributes two boxes: an upper pipe ending `gap` above the
//! gap center and a lower pipe starting `gap` below it. The body loses on any
//! overlap, or when its bottom edge passes the ground line.

use super::rect::Rect;
use super::state::{Body, CrashCause, GameState, Obstacle};
use crate::settings::SimConfig;

/// Upper and lower collision boxes of an obstacle
pub fn obstacle_boxes(obstacle: &Obstacle, config: &SimConfig) -> (Rect, Rect) {
    let size = config.obstacle_size;
    let upper = Rect::new(
        obstacle.x,
        obstacle.gap_center_y - size.y - config.gap,
        size.x,
        size.y,
    );
    let lower = Rect::new(obstacle.x, obstacle.gap_center_y + config.gap, size.x, size.y);
    (upper, lower)
}

/// Collision box of the body
#[inline]
pub fn body_box(body: &Body) -> Rect {
    Rect::from_pos_size(body.pos, body.size)
}

/// True if the body's bottom edge is below the ground line
#[inline]
pub fn below_ground(body: &Body, config: &SimConfig) -> bool {
    body.bottom() > config.ground_y()
}

/// Find what, if anything, the body is touching.
///
/// Every obstacle is tested; the lowest slot index wins when several overlap.
/// Ground contact is reported only when no obstacle is hit.
pub fn find_crash(state: &GameState) -> Option<CrashCause> {
    let config = state.config();
    let body = body_box(&state.body);

    let mut hit = None;
    for (index, obstacle) in state.obstacles.iter().enumerate() {
        let (upper, lower) = obstacle_boxes(obstacle, config);
        if (body.intersects(&upper) || body.intersects(&lower)) && hit.is_none() {
            hit = Some(CrashCause::Obstacle { index });
        }
    }

    if hit.is_none() && below_ground(&state.body, config) {
        hit = Some(CrashCause::Ground);
    }
    hit
}
