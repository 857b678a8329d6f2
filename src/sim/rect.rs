//! Axis-aligned rectangle geometry
//!
//! Everything in the world is a non-rotating rectangle with its origin at the
//! bottom-left corner, Y pointing up: boxes, the duck, and the swept region a
//! moving duck covers within one tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (bottom-left origin, Y-up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    /// Bottom-left corner as a vector
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Check overlap with another rectangle (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        span_overlaps(self.left(), self.right(), self.bottom(), self.top(), other)
    }
}

/// Check whether `rect` intersects the closed region
/// `[min_x, max_x] × [min_y, max_y]`
///
/// Intervals are closed: touching edges count as overlapping, so swept tests
/// catch exact-contact cases.
pub fn span_overlaps(min_x: f32, max_x: f32, min_y: f32, max_y: f32, rect: &Rect) -> bool {
    if max_y < rect.bottom() || min_y > rect.top() {
        return false;
    }
    if max_x < rect.left() || min_x > rect.right() {
        return false;
    }
    true
}

/// Bounds of the region a moving rectangle covers over one tick
///
/// Each bound is extended only on the leading edge for its velocity sign,
/// which collapses the four direction cases (down-right, down-left, up-right,
/// up-left) into a single place.
pub fn swept_bounds(rect: &Rect, vel: Vec2) -> (f32, f32, f32, f32) {
    (
        rect.left() + vel.x.min(0.0),
        rect.right() + vel.x.max(0.0),
        rect.bottom() + vel.y.min(0.0),
        rect.top() + vel.y.max(0.0),
    )
}
