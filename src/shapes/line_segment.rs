use crate::math::vec2::Vec2;
use std::f64::consts::FRAC_PI_2;

/// Static, immutable obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Returns the direction vector of the segment (from a to b).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Calculates the length of the segment.
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// The colliding side of the segment: the direction rotated by -90
    /// degrees, normalized. Only circles on this side are detected.
    pub fn normal(&self) -> Vec2 {
        self.direction().rotate(-FRAC_PI_2).normalize()
    }
}
