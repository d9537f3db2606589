use impulse2d::collision::{detect_circle_circle, detect_circle_segment, resolve_velocities};
use impulse2d::{BoundedVec, Circle, Collision, ManualClock, Scene, SceneConfig, SpawnError, Vec2};

const EPSILON: f64 = 1e-9;

fn empty_scene() -> Scene {
    Scene::new(SceneConfig::empty())
}

fn weightless_config() -> SceneConfig {
    SceneConfig {
        gravity_scale: 0.0,
        ..SceneConfig::empty()
    }
}

#[test]
fn free_fall_matches_gravity_times_steps() {
    let mut scene = empty_scene();
    scene.spawn_circle(3.0, Vec2::new(40.0, 0.0)).unwrap();
    let config = scene.config().clone();
    let steps = 100;

    for _ in 0..steps {
        scene.step_fixed();
    }

    let circle = scene.circles()[0];
    let expected_vy = steps as f64 * config.gravity.y * config.gravity_scale * config.fixed_dt();
    assert!((circle.velocity.y - expected_vy).abs() < EPSILON, "vy = {}", circle.velocity.y);
    assert_eq!(circle.velocity.x, 0.0);
    assert_eq!(circle.position.x, 40.0);
    assert!(circle.position.y > 0.0);
}

#[test]
fn static_circles_never_move() {
    let mut scene = Scene::default();
    scene.spawn_static_circle(4.0, Vec2::new(40.0, 30.0)).unwrap();
    for x in [36.0, 40.0, 44.0] {
        scene.spawn_circle(2.0, Vec2::new(x, 20.0)).unwrap();
    }
    let pinned = scene.circles()[0];

    let clock = ManualClock::new(0);
    for _ in 0..120 {
        clock.advance(16);
        scene.step(&clock);
    }

    let after = scene
        .circles()
        .iter()
        .find(|c| c.is_static())
        .copied()
        .expect("static circle is never culled or removed");
    assert_eq!(after.position, pinned.position);
    assert_eq!(after.velocity, Vec2::ZERO);
}

#[test]
fn overlapping_pairs_are_recorded_once_per_sub_step() {
    let circles = [
        Circle::dynamic(1.0, Vec2::new(0.0, 0.0), 2.0),
        Circle::dynamic(2.0, Vec2::new(2.5, 0.0), 2.0),
        Circle::dynamic(1.0, Vec2::new(10.0, 0.0), 2.0),
    ];
    let mut collisions = BoundedVec::with_capacity(16);
    detect_circle_circle(&circles, &mut collisions);

    assert_eq!(collisions.len(), 1);
    let c: Collision = collisions[0];
    assert!((c.penetration - 0.5).abs() < EPSILON);
    assert!((c.normal.length() - 1.0).abs() < EPSILON);
    // Normal separates A from B
    assert!(c.normal.x < 0.0);
}

#[test]
fn head_on_impact_scales_relative_velocity_by_restitution() {
    let config = SceneConfig::default();
    let mut circles = [
        Circle::dynamic(1.0, Vec2::new(0.0, 0.0), config.density),
        Circle::dynamic(1.0, Vec2::new(1.8, 0.0), config.density),
    ];
    circles[0].velocity = Vec2::new(7.0, 0.0);
    circles[1].velocity = Vec2::new(-3.0, 0.0);

    let mut collisions = BoundedVec::with_capacity(4);
    detect_circle_circle(&circles, &mut collisions);
    let normal = collisions[0].normal;
    let before = (circles[0].velocity - circles[1].velocity).dot(normal);

    resolve_velocities(&mut circles, &collisions, config.restitution);

    let after = (circles[0].velocity - circles[1].velocity).dot(normal);
    assert!((after + config.restitution * before).abs() < EPSILON);
}

#[test]
fn spawning_past_capacity_is_rejected() {
    let config = SceneConfig {
        max_circles: 4,
        ..SceneConfig::empty()
    };
    let mut scene = Scene::new(config);
    for i in 0..4 {
        scene.spawn_circle(1.0, Vec2::new(10.0 * i as f64, 5.0)).unwrap();
    }
    let before: Vec<Circle> = scene.circles().to_vec();

    assert_eq!(
        scene.spawn_circle(1.0, Vec2::new(70.0, 5.0)),
        Err(SpawnError::CircleCapacity(4))
    );
    assert_eq!(scene.circle_count(), 4);
    assert_eq!(scene.circles(), before.as_slice());
}

#[test]
fn same_clock_samples_give_identical_runs() {
    let samples = [0, 16, 33, 50, 66, 83, 400, 401, 417, 433];

    let run = || {
        let mut scene = Scene::default();
        for x in [20.0, 26.0, 40.0, 43.0, 60.0] {
            scene.spawn_circle(2.5, Vec2::new(x, 5.0)).unwrap();
        }
        let clock = ManualClock::new(0);
        let mut ticks = Vec::new();
        for &now in &samples {
            clock.set(now);
            ticks.push(scene.step(&clock));
        }
        (ticks, scene.circles().to_vec())
    };

    let (ticks_a, circles_a) = run();
    let (ticks_b, circles_b) = run();
    assert_eq!(ticks_a, ticks_b);
    assert_eq!(circles_a, circles_b);
    assert!(ticks_a.iter().sum::<usize>() > 0);
}

#[test]
fn resting_at_slop_gets_no_positional_correction() {
    let mut scene = Scene::new(weightless_config());
    scene.add_segment(Vec2::new(0.0, 30.0), Vec2::new(80.0, 30.0)).unwrap();
    // Overlaps the floor by exactly the slop
    let start = Vec2::new(40.0, 30.0 - 1.0 + 0.01);
    scene.spawn_circle(1.0, start).unwrap();

    scene.step_fixed();

    let circle = scene.circles()[0];
    assert!((circle.position - start).length() < 1e-12);
    assert!(circle.velocity.length() < 1e-12);
}

#[test]
fn circle_moving_into_floor_at_slop_is_reflected() {
    let config = weightless_config();
    let floor = [impulse2d::LineSegment::new(Vec2::new(0.0, 30.0), Vec2::new(80.0, 30.0))];
    let mut circles = [Circle::dynamic(1.0, Vec2::new(40.0, 29.01), config.density)];
    circles[0].velocity = Vec2::new(0.0, 4.0);

    let mut collisions = BoundedVec::with_capacity(4);
    detect_circle_segment(&circles, &floor, &mut collisions);
    assert_eq!(collisions.len(), 1);
    resolve_velocities(&mut circles, &collisions, config.restitution);

    assert!((circles[0].velocity.y + config.restitution * 4.0).abs() < EPSILON);
}

#[test]
fn frame_stepping_without_request_freezes_bodies() {
    let config = SceneConfig {
        ticks_per_second: 64,
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(config);
    scene.spawn_circle(3.0, Vec2::new(40.0, 10.0)).unwrap();
    scene.set_frame_stepping(true);
    let before = scene.circles().to_vec();

    let clock = ManualClock::new(0);
    clock.advance(10);
    assert_eq!(scene.step(&clock), 0);
    assert!(scene.accumulator() > 0.0);

    for _ in 0..20 {
        clock.advance(37);
        assert_eq!(scene.step(&clock), 0);
    }
    assert_eq!(scene.circles(), before.as_slice());

    scene.request_single_step();
    clock.advance(37);
    assert_eq!(scene.step(&clock), 1);
    assert_ne!(scene.circles(), before.as_slice());
}

#[test]
fn circle_falling_out_of_bounds_is_culled() {
    let config = SceneConfig {
        max_circles: 3,
        ..SceneConfig::empty()
    };
    let mut scene = Scene::new(config);
    scene.spawn_circle(1.0, Vec2::new(40.0, 59.5)).unwrap();
    scene.spawn_circle(1.0, Vec2::new(10.0, 5.0)).unwrap();
    scene.spawn_circle(1.0, Vec2::new(70.0, 5.0)).unwrap();
    assert!(scene.spawn_circle(1.0, Vec2::new(30.0, 5.0)).is_err());

    for _ in 0..120 {
        scene.step_fixed();
    }
    let bottom = scene.config().bounds_max.y;
    assert_eq!(scene.circles().iter().filter(|c| c.position.y > bottom + c.radius).count(), 1);

    assert_eq!(scene.cull(), 1);
    assert_eq!(scene.circle_count(), 2);
    assert!(scene.circles().iter().all(|c| c.position.y < bottom));

    // The freed slot can be reused
    assert!(scene.spawn_circle(1.0, Vec2::new(30.0, 5.0)).is_ok());
}

#[test]
fn circle_settles_in_default_bowl() {
    let mut scene = Scene::default();
    scene.spawn_circle(3.0, Vec2::new(40.0, 10.0)).unwrap();

    let clock = ManualClock::new(0);
    for _ in 0..300 {
        clock.advance(16);
        scene.step(&clock);
        scene.cull();
    }

    assert_eq!(scene.circle_count(), 1);
    let circle = scene.circles()[0];
    assert!(circle.position.x.is_finite() && circle.position.y.is_finite());
    assert!(circle.position.y < scene.config().bounds_max.y);
}

#[test]
fn clear_circles_then_spawn_again() {
    let mut scene = Scene::default();
    scene.spawn_circle(2.0, Vec2::new(30.0, 10.0)).unwrap();
    scene.spawn_circle(2.0, Vec2::new(50.0, 10.0)).unwrap();
    scene.step_fixed();
    scene.clear_circles();
    assert_eq!(scene.circle_count(), 0);
    assert_eq!(scene.segments().len(), 3);
    assert!(scene.spawn_circle(2.0, Vec2::new(40.0, 10.0)).is_ok());
}
