//! Axis-aligned collision detection
//!
//! Everything in the runner is a box: the player, every obstacle. A hit is a
//! strict overlap on both axes, so boxes that only share an edge never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict AABB intersection test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// True if `subject` overlaps any of `others`
pub fn any_overlap<'a, I>(subject: &Rect, others: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    others.into_iter().any(|other| overlaps(subject, other))
}
