use crate::math::vec2::Vec2;
use crate::shapes::Circle;

/// Semi-implicit Euler, first half: accelerate every dynamic circle by
/// `gravity`. Static circles are skipped.
pub fn integrate_forces(circles: &mut [Circle], gravity: Vec2, dt: f64) {
    for circle in circles.iter_mut() {
        if circle.is_static() {
            continue;
        }
        circle.velocity += gravity * dt;
    }
}

/// Semi-implicit Euler, second half: move every circle along its velocity.
/// Static circles have zero velocity and stay put.
pub fn integrate_positions(circles: &mut [Circle], dt: f64) {
    for circle in circles.iter_mut() {
        circle.position += circle.velocity * dt;
    }
}
