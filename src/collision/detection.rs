use super::manifold::Collision;
use crate::common::BoundedVec;
use crate::shapes::{Circle, LineSegment};

/// Checks for overlap between two circles.
/// The normal points from `b` towards `a`. Coincident centers produce a
/// zero normal, which later yields no impulse.
pub fn check_circle_circle(a: &Circle, a_idx: usize, b: &Circle, b_idx: usize) -> Option<Collision> {
    let normal = a.position - b.position;
    let distance = normal.length();
    let penetration = (a.radius + b.radius) - distance;
    if penetration > 0.0 {
        Some(Collision::between_circles(a_idx, b_idx, penetration, normal.normalize()))
    } else {
        None
    }
}

/// Checks a circle against the colliding side of a segment.
///
/// Only the side given by [`LineSegment::normal`] is tested: a circle whose
/// center is behind the segment is not reported even if it overlaps.
pub fn check_circle_segment(
    circle: &Circle,
    circle_idx: usize,
    segment: &LineSegment,
    segment_idx: usize,
) -> Option<Collision> {
    let direction = segment.direction();
    let normal = segment.normal();
    let to_circle = circle.position - segment.a;
    let on_normal = to_circle.projection_on(normal);
    let on_line = to_circle.projection_on(direction);

    // Outside the segment span extended by the radius on both ends
    if on_line < -circle.radius || on_line > direction.length() + circle.radius {
        return None;
    }

    if on_normal > 0.0 && on_normal <= circle.radius {
        let penetration = circle.radius - on_normal;
        Some(Collision::with_segment(circle_idx, segment_idx, penetration, normal))
    } else {
        None
    }
}

/// Tests every pair of circles once (`i < j`), skipping static pairs.
/// Returns the number of collisions dropped because `collisions` was full.
pub fn detect_circle_circle(circles: &[Circle], collisions: &mut BoundedVec<Collision>) -> usize {
    let mut dropped = 0;
    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let a = &circles[i];
            let b = &circles[j];
            if a.is_static() && b.is_static() {
                continue;
            }
            if let Some(collision) = check_circle_circle(a, i, b, j) {
                if collisions.try_push(collision).is_err() {
                    dropped += 1;
                }
            }
        }
    }
    dropped
}

/// Tests every dynamic circle against every segment.
/// Returns the number of collisions dropped because `collisions` was full.
pub fn detect_circle_segment(
    circles: &[Circle],
    segments: &[LineSegment],
    collisions: &mut BoundedVec<Collision>,
) -> usize {
    let mut dropped = 0;
    for (i, circle) in circles.iter().enumerate() {
        if circle.is_static() {
            continue;
        }
        for (j, segment) in segments.iter().enumerate() {
            if let Some(collision) = check_circle_segment(circle, i, segment, j) {
                if collisions.try_push(collision).is_err() {
                    dropped += 1;
                }
            }
        }
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionTarget;
    use crate::math::vec2::Vec2;
    const EPSILON: f64 = 1e-9;

    fn ball(radius: f64, x: f64, y: f64) -> Circle {
        Circle::dynamic(radius, Vec2::new(x, y), 1.0)
    }

    #[test]
    fn test_circle_circle_overlap() {
        let a = ball(1.0, 1.5, 0.0);
        let b = ball(1.0, 0.0, 0.0);
        let c = check_circle_circle(&a, 0, &b, 1).expect("circles overlap");
        assert!((c.penetration - 0.5).abs() < EPSILON);
        assert!((c.normal.x - 1.0).abs() < EPSILON);
        assert!(c.normal.y.abs() < EPSILON);
        assert_eq!(c.body_a, 0);
        assert_eq!(c.target, CollisionTarget::Circle(1));
        assert!(!c.is_segment_collision());
    }

    #[test]
    fn test_circle_circle_touching_is_not_a_collision() {
        let a = ball(1.0, 2.0, 0.0);
        let b = ball(1.0, 0.0, 0.0);
        assert!(check_circle_circle(&a, 0, &b, 1).is_none());
    }

    #[test]
    fn test_coincident_circles_get_zero_normal() {
        let a = ball(1.0, 5.0, 5.0);
        let b = ball(2.0, 5.0, 5.0);
        let c = check_circle_circle(&a, 0, &b, 1).expect("coincident circles overlap");
        assert!((c.penetration - 3.0).abs() < EPSILON);
        assert_eq!(c.normal, Vec2::ZERO);
    }

    #[test]
    fn test_detect_skips_static_pairs() {
        let circles = [
            Circle::fixed(1.0, Vec2::new(0.0, 0.0)),
            Circle::fixed(1.0, Vec2::new(1.0, 0.0)),
            ball(1.0, 0.5, 1.0),
        ];
        let mut collisions = BoundedVec::with_capacity(8);
        let dropped = detect_circle_circle(&circles, &mut collisions);
        assert_eq!(dropped, 0);
        assert_eq!(collisions.len(), 2);
        assert!(collisions.iter().all(|c| c.body_b() == Some(2)));
    }

    #[test]
    fn test_detect_reports_dropped_collisions() {
        // Three mutually overlapping circles make three pairs
        let circles = [ball(1.0, 0.0, 0.0), ball(1.0, 0.5, 0.0), ball(1.0, 0.0, 0.5)];
        let mut collisions = BoundedVec::with_capacity(2);
        let dropped = detect_circle_circle(&circles, &mut collisions);
        assert_eq!(collisions.len(), 2);
        assert_eq!(dropped, 1);
        // Pairs are recorded in (i, j) order
        assert_eq!(collisions[0].body_a, 0);
        assert_eq!(collisions[0].body_b(), Some(1));
        assert_eq!(collisions[1].body_b(), Some(2));
    }

    #[test]
    fn test_circle_resting_on_segment() {
        // Segment along x; its normal points to -y
        let floor = LineSegment::new(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0));
        let c = ball(1.0, 5.0, 9.25);
        let hit = check_circle_segment(&c, 3, &floor, 1).expect("circle overlaps floor");
        assert!((hit.penetration - 0.25).abs() < EPSILON);
        assert!(hit.normal.x.abs() < EPSILON);
        assert!((hit.normal.y + 1.0).abs() < EPSILON);
        assert_eq!(hit.body_a, 3);
        assert_eq!(hit.target, CollisionTarget::Segment(1));
        assert!(hit.is_segment_collision());
        assert_eq!(hit.body_b(), None);
    }

    #[test]
    fn test_circle_behind_segment_is_ignored() {
        let floor = LineSegment::new(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0));
        let below = ball(1.0, 5.0, 10.5);
        assert!(check_circle_segment(&below, 0, &floor, 0).is_none());
    }

    #[test]
    fn test_circle_past_segment_end_is_ignored() {
        let floor = LineSegment::new(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0));
        let past_end = ball(1.0, 21.5, 9.5);
        assert!(check_circle_segment(&past_end, 0, &floor, 0).is_none());

        // Within the radius-extended span it still collides
        let near_end = ball(1.0, 20.5, 9.5);
        assert!(check_circle_segment(&near_end, 0, &floor, 0).is_some());
    }

    #[test]
    fn test_static_circles_skip_segments() {
        let floor = LineSegment::new(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0));
        let circles = [Circle::fixed(1.0, Vec2::new(5.0, 9.5))];
        let mut collisions = BoundedVec::with_capacity(4);
        assert_eq!(detect_circle_segment(&circles, &[floor], &mut collisions), 0);
        assert!(collisions.is_empty());
    }
}
