//! Body physics
//!
//! Velocity is in pixels per tick: gravity accelerates it per second, but it
//! is added to the position once per tick without scaling by dt.

use super::state::Body;
use crate::settings::SimConfig;

/// Replace the current velocity with the upward jump velocity
#[inline]
pub fn jump(body: &mut Body, config: &SimConfig) {
    body.velocity = -config.jump_impulse;
}

/// Apply gravity and move the body one tick.
///
/// The ceiling clamp only pins the position. Velocity keeps whatever value it
/// had, so a body that hit the ceiling stays pinned until gravity has pulled
/// its velocity positive enough to carry it below the ceiling in one step.
pub fn integrate(body: &mut Body, config: &SimConfig, dt: f32) {
    body.velocity += config.gravity * dt;
    body.pos.y += body.velocity;

    let ceiling = config.ceiling_y();
    if body.pos.y < ceiling {
        body.pos.y = ceiling;
    }
}
