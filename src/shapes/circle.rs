use crate::math::vec2::Vec2;
use std::f64::consts::PI;

/// A circular body. `inv_mass == 0.0` marks a static (immovable) circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub inv_mass: f64,
}

impl Circle {
    /// Creates a dynamic circle at rest. Mass is the disc area times `density`
    /// and is never recomputed afterwards.
    pub fn dynamic(radius: f64, position: Vec2, density: f64) -> Self {
        let mass = PI * radius * radius * density;
        Self {
            radius,
            position,
            velocity: Vec2::ZERO,
            inv_mass: 1.0 / mass,
        }
    }

    /// Creates a static circle (infinite mass).
    pub fn fixed(radius: f64, position: Vec2) -> Self {
        Self {
            radius,
            position,
            velocity: Vec2::ZERO,
            inv_mass: 0.0,
        }
    }

    pub fn set_static(&mut self) {
        self.inv_mass = 0.0;
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Mass of the circle, `f64::INFINITY` for static ones.
    pub fn mass(&self) -> f64 {
        if self.is_static() {
            f64::INFINITY
        } else {
            1.0 / self.inv_mass
        }
    }

    /// True when the circle lies entirely outside the box `[min, max]`
    /// grown by its own radius.
    pub fn is_outside(&self, min: Vec2, max: Vec2) -> bool {
        let r = self.radius;
        self.position.x < min.x - r
            || self.position.x > max.x + r
            || self.position.y < min.y - r
            || self.position.y > max.y + r
    }
}
