//! Per-frame simulation tick
//!
//! Order within a tick: debug toggle, restart or jump, then (while Playing)
//! cosmetic scroll, body physics, obstacle recycling and collision.

use super::collision::find_crash;
use super::physics;
use super::recycler;
use super::state::{GameEvent, GameState, RunPhase};

/// Input events for a single tick (edge-triggered)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed this frame
    pub jump: bool,
    /// Restart pressed this frame
    pub restart: bool,
    /// Debug overlay toggle pressed this frame
    pub toggle_debug: bool,
    /// Demo mode - the core decides when to jump
    pub autopilot: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);
    state.events.clear();

    if input.toggle_debug {
        state.debug = !state.debug;
        state.events.push(GameEvent::DebugToggled(state.debug));
        log::debug!("Debug overlay {}", if state.debug { "on" } else { "off" });
    }

    if input.restart {
        // Restart wins over a jump in the same frame
        state.restart();
    } else if state.phase == RunPhase::Playing
        && (input.jump || (input.autopilot && autopilot_wants_jump(state)))
    {
        physics::jump(&mut state.body, &state.config);
        state.events.push(GameEvent::Jumped);
    }

    // Frozen until restart
    if state.phase == RunPhase::Ended {
        return;
    }

    state.run_ticks += 1;
    advance_scroll(state, dt);

    physics::integrate(&mut state.body, &state.config, dt);
    recycler::advance(state, dt);

    if let Some(cause) = find_crash(state) {
        state.end_run(cause);
    }

    log::trace!(
        "tick {}: y = {:.2}, vel = {:.3}",
        state.run_ticks,
        state.body.pos.y,
        state.body.velocity
    );
}

/// Background and foreground scroll. Rates are whole pixels per second
/// wrapped to the background width, offsets wrap to their sprite widths.
fn advance_scroll(state: &mut GameState, dt: f32) {
    let config = state.config();
    let bg_rate = (config.scroll_speed * config.background_scroll_factor).trunc()
        % config.background_width;
    let fg_rate = config.scroll_speed.trunc() % config.background_width;

    let bg = (state.scroll.background + bg_rate * dt).rem_euclid(config.background_width);
    let fg = (state.scroll.foreground + fg_rate * dt).rem_euclid(config.foreground_width);
    state.scroll.background = bg;
    state.scroll.foreground = fg;
}

/// Demo-mode pilot: flap when the body's bottom edge has sunk below the gap
/// center of the next obstacle and the body is not already rising.
fn autopilot_wants_jump(state: &GameState) -> bool {
    let body = &state.body;
    if body.velocity < 0.0 {
        return false;
    }

    let config = state.config();
    let next = state
        .obstacles
        .iter()
        .filter(|o| o.x + config.obstacle_size.x >= body.pos.x)
        .min_by(|a, b| {
            a.x.partial_cmp(&b.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target = match next {
        Some(obstacle) => obstacle.gap_center_y,
        None => config.ground_y() * 0.5,
    };

    body.bottom() > target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::state::{Body, CrashCause};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn new_state() -> GameState {
        GameState::with_seed(SimConfig::default(), 12345).unwrap()
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    fn restart() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_applies_gravity_and_scroll() {
        let mut state = new_state();
        let x0 = state.obstacles[0].x;
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, RunPhase::Playing);
        assert!(state.body.velocity > 0.0);
        assert!(state.body.pos.y > 206.0);
        assert!((state.obstacles[0].x - (x0 - 110.0 * DT)).abs() < 1e-4);
        assert_eq!(state.run_ticks, 1);
    }

    #[test]
    fn test_jump_sets_upward_velocity() {
        let mut state = new_state();
        state.body.velocity = 7.5;
        tick(&mut state, &jump(), DT);

        let expected = -5.0 + 20.0 * DT;
        assert!((state.body.velocity - expected).abs() < 1e-5);
        assert!(state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_ground_ends_run() {
        let mut state = new_state();
        let mut ticks = 0;
        while state.phase == RunPhase::Playing {
            tick(&mut state, &TickInput::default(), DT);
            ticks += 1;
            assert!(ticks < 1000);
        }
        // Free fall from 206 hits the ground before the first pipe arrives
        assert!(state.events.contains(&GameEvent::Crashed(CrashCause::Ground)));
        assert!(state.body.bottom() > 400.0);
    }

    #[test]
    fn test_ended_state_is_frozen() {
        let mut state = new_state();
        state.body.pos.y = 390.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, RunPhase::Ended);

        let body = state.body;
        let obstacles = state.obstacles.clone();
        let scroll = state.scroll;
        let ticks = state.run_ticks;

        for _ in 0..30 {
            tick(&mut state, &jump(), DT);
            assert!(state.events.is_empty());
        }

        assert_eq!(state.phase, RunPhase::Ended);
        assert_eq!(state.body, body);
        assert_eq!(state.obstacles, obstacles);
        assert_eq!(state.scroll, scroll);
        assert_eq!(state.run_ticks, ticks);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = new_state();
        state.body.pos.y = 390.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, RunPhase::Ended);

        tick(&mut state, &restart(), 0.0);

        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.body, Body::spawn(state.config()));
        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![338.0, 528.0, 718.0]);
        assert_eq!(state.last_spawned_x(), 718.0);
        assert_eq!(state.events[0], GameEvent::Restarted);
    }

    #[test]
    fn test_restart_tick_still_integrates() {
        let mut state = new_state();
        state.body.pos.y = 390.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, RunPhase::Ended);

        tick(&mut state, &restart(), DT);

        let spawn = Body::spawn(state.config());
        assert!((state.body.velocity - 20.0 * DT).abs() < 1e-6);
        assert!(state.body.pos.y > spawn.pos.y);
        assert_eq!(state.run_ticks, 1);
    }

    #[test]
    fn test_restart_beats_jump() {
        let mut state = new_state();
        let input = TickInput {
            jump: true,
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.body.velocity, 0.0);
        assert!(!state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_restart_while_playing() {
        let mut state = new_state();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        tick(&mut state, &restart(), 0.0);
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.body.pos, Vec2::new(75.0, 206.0));
        assert_eq!(state.runs, 1);
    }

    #[test]
    fn test_debug_toggle_live_in_any_phase() {
        let mut state = new_state();
        let toggle = TickInput {
            toggle_debug: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, DT);
        assert!(state.debug);

        state.body.pos.y = 390.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, RunPhase::Ended);

        tick(&mut state, &toggle, DT);
        assert!(!state.debug);
        assert_eq!(state.events, vec![GameEvent::DebugToggled(false)]);
    }

    #[test]
    fn test_negative_dt_treated_as_zero() {
        let mut state = new_state();
        let x0 = state.obstacles[0].x;
        tick(&mut state, &TickInput::default(), -1.0);
        assert_eq!(state.obstacles[0].x, x0);
        assert_eq!(state.body.velocity, 0.0);
    }

    #[test]
    fn test_scroll_rates_and_wrap() {
        let mut state = new_state();
        tick(&mut state, &TickInput::default(), 1.0);
        // 110 * 0.4 = 44 px/s background, 110 px/s foreground
        assert!((state.scroll.background - 44.0).abs() < 1e-4);
        assert!((state.scroll.foreground - 110.0).abs() < 1e-4);

        state.scroll.foreground = 330.0;
        state.phase = RunPhase::Playing;
        tick(&mut state, &restart(), 0.1);
        assert!((state.scroll.foreground - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_autopilot_flaps_when_low() {
        let mut state = new_state();
        // Bottom edge below any possible target line
        state.body.pos.y = 370.0;
        state.body.velocity = 1.0;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_autopilot_targets_gap_center() {
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        // Bottom edge just below the next gap center: flap
        let mut state = new_state();
        let center = state.obstacles[0].gap_center_y;
        state.body.pos.y = center + 1.0 - state.body.size.y;
        state.body.velocity = 0.0;
        tick(&mut state, &input, DT);
        assert!(state.events.contains(&GameEvent::Jumped));

        // Just above it: keep falling
        let mut state = new_state();
        let center = state.obstacles[0].gap_center_y;
        state.body.pos.y = center - 1.0 - state.body.size.y;
        state.body.velocity = 0.0;
        tick(&mut state, &input, DT);
        assert!(!state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_autopilot_waits_while_rising() {
        let mut state = new_state();
        state.body.pos.y = 350.0;
        state.body.velocity = -2.0;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_spacing_holds_over_long_autopilot_session() {
        let mut state = new_state();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..5000 {
            if state.phase == RunPhase::Ended {
                tick(&mut state, &restart(), DT);
                continue;
            }
            tick(&mut state, &input, DT);
            let ordered = state.obstacles_in_spawn_order();
            for pair in ordered.windows(2) {
                assert!((pair[1].x - pair[0].x - 190.0).abs() < 1e-2);
            }
            assert!(state.body.pos.y >= -36.0);
        }
    }
}
