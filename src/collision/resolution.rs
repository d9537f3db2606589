//! Collision response: a single impulse pass on velocities followed,
//! later in the sub-step, by a positional nudge that removes the part of
//! the overlap the impulses could not.
//!
//! Both passes walk the collisions in the order they were recorded. There
//! is no sorting and no iterative solver.

use super::manifold::{Collision, CollisionTarget};
use crate::math::vec2::Vec2;
use crate::shapes::Circle;

/// Baumgarte correction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionalCorrection {
    /// Fraction of the remaining overlap removed per sub-step.
    pub percent: f64,
    /// Overlap tolerated without correction.
    pub slop: f64,
}

impl Default for PositionalCorrection {
    fn default() -> Self {
        Self {
            percent: 0.2,
            slop: 0.01,
        }
    }
}

/// Returns mutable references to two distinct circles.
fn pair_mut(circles: &mut [Circle], a: usize, b: usize) -> (&mut Circle, &mut Circle) {
    assert_ne!(a, b, "a collision cannot involve the same circle twice");
    if a < b {
        let (head, tail) = circles.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = circles.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

/// Applies the restitution impulse for one collision.
pub fn resolve_collision_impulse(circles: &mut [Circle], collision: &Collision, restitution: f64) {
    let normal = collision.normal;
    match collision.target {
        CollisionTarget::Circle(b_idx) => {
            let (a, b) = pair_mut(circles, collision.body_a, b_idx);
            let relative_velocity = a.velocity - b.velocity;
            let velocity_along_normal = relative_velocity.dot(normal);
            // Already separating
            if velocity_along_normal > 0.0 {
                return;
            }
            let impulse_scalar = -(1.0 + restitution) * velocity_along_normal / (a.inv_mass + b.inv_mass);
            let impulse = impulse_scalar * normal;
            a.velocity += a.inv_mass * impulse;
            b.velocity -= b.inv_mass * impulse;
        }
        CollisionTarget::Segment(_) => {
            let a = &mut circles[collision.body_a];
            let velocity_along_normal = a.velocity.dot(normal);
            if velocity_along_normal > 0.0 {
                return;
            }
            let impulse_scalar = -(1.0 + restitution) * velocity_along_normal / a.inv_mass;
            let impulse = impulse_scalar * normal;
            a.velocity += a.inv_mass * impulse;
        }
    }
}

/// Pushes the bodies of one collision apart in proportion to their inverse mass.
pub fn apply_positional_correction(circles: &mut [Circle], collision: &Collision, params: PositionalCorrection) {
    let depth = (collision.penetration - params.slop).max(0.0);
    match collision.target {
        CollisionTarget::Circle(b_idx) => {
            let (a, b) = pair_mut(circles, collision.body_a, b_idx);
            let correction = correction_vector(collision.normal, depth, params.percent, a.inv_mass + b.inv_mass);
            a.position += a.inv_mass * correction;
            b.position -= b.inv_mass * correction;
        }
        CollisionTarget::Segment(_) => {
            let a = &mut circles[collision.body_a];
            let correction = correction_vector(collision.normal, depth, params.percent, a.inv_mass);
            a.position += a.inv_mass * correction;
        }
    }
}

fn correction_vector(normal: Vec2, depth: f64, percent: f64, inv_mass_sum: f64) -> Vec2 {
    normal * percent * (depth / inv_mass_sum)
}

/// Velocity pass over every recorded collision.
pub fn resolve_velocities(circles: &mut [Circle], collisions: &[Collision], restitution: f64) {
    for collision in collisions {
        resolve_collision_impulse(circles, collision, restitution);
    }
}

/// Position pass over every recorded collision. Runs after positions have
/// been integrated for the sub-step.
pub fn correct_penetration(circles: &mut [Circle], collisions: &[Collision], params: PositionalCorrection) {
    for collision in collisions {
        apply_positional_correction(circles, collision, params);
    }
}
