//! Obstacle scrolling and recycling
//!
//! Obstacles live in fixed slots. When one has fully left the screen it is
//! moved to `PIPE_SPACE` past the most recently spawned obstacle with a fresh
//! gap center, so consecutive obstacles in spawn order are always exactly one
//! spacing apart.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GameState, Obstacle};
use crate::settings::SimConfig;

/// Draw a gap center from the configured inclusive range.
///
/// Centers are whole pixels; a range too narrow to hold an integer falls back
/// to its lower bound.
pub fn draw_gap_center(rng: &mut Pcg32, config: &SimConfig) -> f32 {
    let (min, max) = config.gap_center_range();
    let lo = min.ceil() as i32;
    let hi = max.floor() as i32;
    if lo > hi {
        return min;
    }
    rng.random_range(lo..=hi) as f32
}

/// Lay out a fresh obstacle set left to right, starting just off the right
/// edge, and mark the rightmost as most recently spawned.
pub fn layout(state: &mut GameState) {
    let count = state.config().obstacle_count;
    let first_x = state.config().first_spawn_x();
    let space = state.config().pipe_space;

    state.obstacles.clear();
    for i in 0..count {
        let gap_center_y = state.draw_gap_center();
        let serial = state.next_serial();
        state.obstacles.push(Obstacle {
            x: first_x + space * i as f32,
            gap_center_y,
            serial,
        });
    }
    state.last_spawned = count - 1;
}

/// Scroll every obstacle left, then recycle the ones that left the screen.
///
/// All obstacles move before any recycle, so a recycled obstacle is placed
/// relative to the post-move position of the last spawn. Several recycles in
/// one tick chain off each other, leftmost first.
pub fn advance(state: &mut GameState, dt: f32) {
    let shift = state.config().scroll_speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.x -= shift;
    }

    let exit_x = -state.config().obstacle_size.x;
    let mut exited: Vec<usize> = (0..state.obstacles.len())
        .filter(|&i| state.obstacles[i].x < exit_x)
        .collect();
    exited.sort_by(|&a, &b| {
        state.obstacles[a]
            .x
            .partial_cmp(&state.obstacles[b].x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for index in exited {
        recycle(state, index);
    }
}

/// Respawn the obstacle in `index` one spacing past the last spawn
pub fn recycle(state: &mut GameState, index: usize) {
    let x = state.last_spawned_x() + state.config().pipe_space;
    let gap_center_y = state.draw_gap_center();
    let serial = state.next_serial();

    state.obstacles[index] = Obstacle {
        x,
        gap_center_y,
        serial,
    };
    state.last_spawned = index;
    state.events.push(GameEvent::Recycled {
        index,
        x,
        gap_center_y,
    });
    log::debug!(
        "Recycled obstacle {} to x = {:.1}, gap center = {}",
        index,
        x,
        gap_center_y
    );
}
