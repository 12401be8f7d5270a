//! Axis-aligned boxes for collision
//!
//! Screen space: x grows right, y grows down. A box is anchored at its
//! top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Overlap test. Touching edges count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}
