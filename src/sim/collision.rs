//! Axis-aligned bounding box tests
//!
//! Boxes are half-open: two boxes that only share an edge do not overlap.

use glam::Vec2;

/// An axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test (touching edges is not a hit)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x + other.size.x
            && self.min.x + self.size.x > other.min.x
            && self.min.y < other.min.y + other.size.y
            && self.min.y + self.size.y > other.min.y
    }

    /// True iff the whole box lies inside `[0, width] x [0, height]`
    #[inline]
    pub fn within(&self, width: f32, height: f32) -> bool {
        let max = self.max();
        self.min.x >= 0.0 && self.min.y >= 0.0 && max.x <= width && max.y <= height
    }
}
