//! Presentation helpers
//!
//! The game draws into a fixed virtual screen that is then scaled onto the
//! window. Nothing here touches a GPU: [`letterbox`] computes where the
//! virtual screen lands on a surface, and [`draw_list`] turns a snapshot into
//! an ordered list of draw commands for whatever backend is in use.

use glam::Vec2;

use crate::sim::{Rect, RunPhase, Snapshot};

/// Overlay colors (RGBA, 0-1)
pub const GAME_OVER_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 125.0 / 255.0];
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const BODY_OUTLINE: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
pub const PIPE_OUTLINE: [f32; 4] = [0.0, 0.47, 0.95, 1.0];

/// Text shown over a finished run
pub const GAME_OVER_TEXT: &str = "GAME OVER\nPress [R] to restart";

/// Where the virtual screen lands on the output surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner on the surface
    pub origin: Vec2,
    /// Scaled size on the surface
    pub size: Vec2,
    /// Uniform scale factor
    pub scale: f32,
}

impl Viewport {
    /// Map a surface point (e.g. a mouse position) into virtual coordinates
    pub fn to_virtual(&self, point: Vec2) -> Vec2 {
        (point - self.origin) / self.scale
    }
}

/// Fit the virtual screen inside the surface with a uniform scale, centered
/// (letterboxed on the sides or top and bottom).
pub fn letterbox(surface: Vec2, virtual_size: Vec2) -> Viewport {
    let scale = (surface.x / virtual_size.x).min(surface.y / virtual_size.y);
    let size = virtual_size * scale;
    Viewport {
        origin: (surface - size) * 0.5,
        size,
        scale,
    }
}

/// Sprites the backend must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Body,
    /// Obstacle sprite drawn vertically flipped
    PipeUpper,
    PipeLower,
    Foreground,
}

/// One draw operation, in virtual-screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Sprite at `dest`; `scroll_x` offsets the source rect (texture wraps)
    Sprite {
        sprite: Sprite,
        dest: Rect,
        scroll_x: f32,
    },
    /// Filled rectangle
    Fill { rect: Rect, color: [f32; 4] },
    /// Rectangle outline
    Outline {
        rect: Rect,
        thickness: f32,
        color: [f32; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: [f32; 4],
    },
}

/// Build the frame's draw commands, back to front
pub fn draw_list(snap: &Snapshot) -> Vec<DrawCmd> {
    let screen = snap.visible_size;
    let mut cmds = Vec::with_capacity(4 + snap.obstacles.len() * 4);

    cmds.push(DrawCmd::Sprite {
        sprite: Sprite::Background,
        dest: Rect::new(0.0, 0.0, screen.x, screen.y),
        scroll_x: snap.scroll.background,
    });

    cmds.push(DrawCmd::Sprite {
        sprite: Sprite::Body,
        dest: Rect::from_pos_size(snap.body.pos, snap.body.size),
        scroll_x: 0.0,
    });

    for obstacle in &snap.obstacles {
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::PipeUpper,
            dest: obstacle.upper,
            scroll_x: 0.0,
        });
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::PipeLower,
            dest: obstacle.lower,
            scroll_x: 0.0,
        });
    }

    cmds.push(DrawCmd::Sprite {
        sprite: Sprite::Foreground,
        dest: Rect::new(0.0, snap.ground_y, screen.x, screen.y - snap.ground_y),
        scroll_x: snap.scroll.foreground,
    });

    match snap.phase {
        RunPhase::Ended => {
            cmds.push(DrawCmd::Fill {
                rect: Rect::new(0.0, 0.0, screen.x, screen.y),
                color: GAME_OVER_SHADE,
            });
            cmds.push(DrawCmd::Text {
                text: GAME_OVER_TEXT.to_string(),
                pos: Vec2::new(30.0, 80.0),
                size: 22.0,
                color: WHITE,
            });
        }
        RunPhase::Playing if snap.debug => push_debug(snap, &mut cmds),
        RunPhase::Playing => {}
    }

    cmds
}

/// Collision boxes and the body readout
fn push_debug(snap: &Snapshot, cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::Outline {
        rect: Rect::from_pos_size(snap.body.pos, snap.body.size),
        thickness: 3.0,
        color: BODY_OUTLINE,
    });

    for obstacle in &snap.obstacles {
        for rect in [obstacle.upper, obstacle.lower] {
            cmds.push(DrawCmd::Outline {
                rect,
                thickness: 3.0,
                color: PIPE_OUTLINE,
            });
        }
    }

    cmds.push(DrawCmd::Text {
        text: format!(
            "pos: {}\nvel: {:.6}",
            snap.body.pos.y as i32, snap.body.velocity
        ),
        pos: Vec2::new(snap.body.pos.x, snap.body.bottom()),
        size: 12.0,
        color: BLACK,
    });
}
