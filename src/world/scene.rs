use tracing::{debug, info, warn};

use crate::collision::{self, Collision, PositionalCorrection};
use crate::common::BoundedVec;
use crate::config::SceneConfig;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, LineSegment};
use crate::time::{Clock, FixedTimestep, Tick};

/// Why a lifecycle operation was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnError {
    CircleCapacity(usize),
    SegmentCapacity(usize),
    InvalidRadius(f64),
    /// Segments can only be added before the first step.
    SegmentsSealed,
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnError::CircleCapacity(max) => write!(f, "circle limit of {} reached", max),
            SpawnError::SegmentCapacity(max) => write!(f, "segment limit of {} reached", max),
            SpawnError::InvalidRadius(r) => write!(f, "radius must be positive and finite, got {}", r),
            SpawnError::SegmentsSealed => write!(f, "segments cannot be added once the scene is running"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Owns every body of the simulation and drives the fixed-step pipeline.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    circles: BoundedVec<Circle>,
    segments: BoundedVec<LineSegment>,
    collisions: BoundedVec<Collision>,
    timestep: FixedTimestep,
    gravity: Vec2,
    correction: PositionalCorrection,
    running: bool,
}

impl Scene {
    /// Builds a scene and creates the configured obstacle segments. Never
    /// fails; segments beyond `max_segments` are dropped with a warning.
    pub fn new(config: SceneConfig) -> Self {
        let mut segments = BoundedVec::with_capacity(config.max_segments);
        for s in &config.segments {
            if let Err(e) = segments.try_push(LineSegment::new(s.a, s.b)) {
                warn!("Segments limit reached ({}), dropped {:?} -> {:?}", e.capacity, s.a, s.b);
            }
        }

        let scene = Self {
            circles: BoundedVec::with_capacity(config.max_circles),
            segments,
            collisions: BoundedVec::with_capacity(config.max_collisions),
            timestep: FixedTimestep::from_rate(config.ticks_per_second),
            gravity: config.scaled_gravity(),
            correction: PositionalCorrection {
                percent: config.correction_percent,
                slop: config.correction_slop,
            },
            running: false,
            config,
        };

        info!(
            "Scene initialized: {} segments, capacity {} circles / {} collisions, {} ticks per second",
            scene.segments.len(),
            scene.circles.capacity(),
            scene.collisions.capacity(),
            scene.config.ticks_per_second
        );
        scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Collisions of the sub-step in progress. Always empty between sub-steps.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn accumulator(&self) -> f64 {
        self.timestep.accumulator()
    }

    pub fn fixed_dt(&self) -> f64 {
        self.timestep.dt()
    }

    /// Spawns a dynamic circle at rest. Its mass follows from its area and
    /// the configured density.
    pub fn spawn_circle(&mut self, radius: f64, position: Vec2) -> Result<(), SpawnError> {
        self.check_radius(radius)?;
        let circle = Circle::dynamic(radius, position, self.config.density);
        self.insert_circle(circle)
    }

    /// Spawns an immovable circle.
    pub fn spawn_static_circle(&mut self, radius: f64, position: Vec2) -> Result<(), SpawnError> {
        self.check_radius(radius)?;
        self.insert_circle(Circle::fixed(radius, position))
    }

    fn check_radius(&self, radius: f64) -> Result<(), SpawnError> {
        if radius.is_finite() && radius > 0.0 {
            Ok(())
        } else {
            warn!("Rejected circle with radius {}", radius);
            Err(SpawnError::InvalidRadius(radius))
        }
    }

    fn insert_circle(&mut self, circle: Circle) -> Result<(), SpawnError> {
        self.circles.try_push(circle).map_err(|e| {
            warn!("Circles limit reached ({})", e.capacity);
            SpawnError::CircleCapacity(e.capacity)
        })
    }

    /// Adds a static segment. Only allowed before the simulation has stepped.
    pub fn add_segment(&mut self, a: Vec2, b: Vec2) -> Result<(), SpawnError> {
        if self.running {
            warn!("Ignored segment {:?} -> {:?}: scene already running", a, b);
            return Err(SpawnError::SegmentsSealed);
        }
        self.segments.try_push(LineSegment::new(a, b)).map_err(|e| {
            warn!("Segments limit reached ({})", e.capacity);
            SpawnError::SegmentCapacity(e.capacity)
        })
    }

    /// Removes every circle. Segments are kept.
    pub fn clear_circles(&mut self) {
        debug!("Clearing {} circles", self.circles.len());
        self.circles.clear();
    }

    /// Removes every dynamic circle that left the world bounds (grown by its
    /// radius). Removal swaps the last circle into the freed slot, so the
    /// order of the remaining circles changes. Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let (min, max) = (self.config.bounds_min, self.config.bounds_max);
        let mut removed = 0;
        let mut i = 0;
        while i < self.circles.len() {
            let circle = &self.circles[i];
            if !circle.is_static() && circle.is_outside(min, max) {
                debug!("Deleting circle {} at {:?}", i, circle.position);
                self.circles.swap_remove(i);
                removed += 1;
                // Re-check the circle swapped into slot i
                continue;
            }
            i += 1;
        }
        removed
    }

    pub fn frame_stepping(&self) -> bool {
        self.timestep.frame_stepping()
    }

    pub fn set_frame_stepping(&mut self, enabled: bool) {
        self.timestep.set_frame_stepping(enabled);
    }

    pub fn toggle_frame_stepping(&mut self) {
        self.timestep.toggle_frame_stepping();
    }

    pub fn request_single_step(&mut self) {
        self.timestep.request_single_step();
    }

    /// Samples `clock` once and runs as many fixed sub-steps as the
    /// accumulated time allows. Returns the number of sub-steps executed.
    pub fn step<C: Clock + ?Sized>(&mut self, clock: &C) -> usize {
        self.running = true;
        self.timestep.sample(clock.now_millis());
        let mut executed = 0;
        while let Some(tick) = self.timestep.next_tick() {
            if tick == Tick::Run {
                self.step_fixed();
                executed += 1;
            }
        }
        executed
    }

    /// Runs exactly one fixed sub-step, bypassing the clock.
    pub fn step_fixed(&mut self) {
        self.running = true;
        let dt = self.timestep.dt();

        // 1. Apply gravity
        integrator::integrate_forces(&mut self.circles, self.gravity, dt);

        // 2-3. Collision detection
        let mut dropped = collision::detect_circle_circle(&self.circles, &mut self.collisions);
        dropped += collision::detect_circle_segment(&self.circles, &self.segments, &mut self.collisions);
        if dropped > 0 {
            warn!(
                "Collisions limit reached ({}), dropped {} this sub-step",
                self.collisions.capacity(),
                dropped
            );
        }

        // 4. Impulses
        collision::resolve_velocities(&mut self.circles, &self.collisions, self.config.restitution);

        // 5. Move
        integrator::integrate_positions(&mut self.circles, dt);

        // 6. Positional correction, must follow position integration
        collision::correct_penetration(&mut self.circles, &self.collisions, self.correction);

        self.collisions.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
