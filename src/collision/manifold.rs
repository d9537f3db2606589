use crate::math::vec2::Vec2;

/// What body A collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionTarget {
    /// Index of another circle in the scene.
    Circle(usize),
    /// Index of a static segment. Segments contribute zero velocity and
    /// zero inverse mass to the response.
    Segment(usize),
}

/// A contact found during one fixed sub-step. Indices are only valid
/// until the collision list is cleared at the end of that sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Index of the first circle involved in the collision.
    pub body_a: usize,
    pub target: CollisionTarget,
    /// Overlap along the normal.
    pub penetration: f64,
    /// Unit normal pointing from B towards A (or away from the segment).
    pub normal: Vec2,
}

impl Collision {
    pub fn between_circles(body_a: usize, body_b: usize, penetration: f64, normal: Vec2) -> Self {
        Self {
            body_a,
            target: CollisionTarget::Circle(body_b),
            penetration,
            normal,
        }
    }

    pub fn with_segment(body_a: usize, segment: usize, penetration: f64, normal: Vec2) -> Self {
        Self {
            body_a,
            target: CollisionTarget::Segment(segment),
            penetration,
            normal,
        }
    }

    pub fn is_segment_collision(&self) -> bool {
        matches!(self.target, CollisionTarget::Segment(_))
    }

    /// Index of the second circle, `None` for segment collisions.
    pub fn body_b(&self) -> Option<usize> {
        match self.target {
            CollisionTarget::Circle(idx) => Some(idx),
            CollisionTarget::Segment(_) => None,
        }
    }
}
