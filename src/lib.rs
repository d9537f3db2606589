//! Real-time 2D impulse simulation of circles bouncing off each other and
//! off static line segments, advanced at a fixed tick rate.
//!
//! The host owns a [`Scene`], feeds it time through a [`Clock`] once per
//! frame with [`Scene::step`], and reads [`Scene::circles`] and
//! [`Scene::segments`] back for drawing.

pub mod math;
pub mod common;
pub mod shapes;
pub mod collision;
pub mod integration;
pub mod time;
pub mod config;
pub mod world;

// Re-export key types for easier use
pub use math::vec2::Vec2;
pub use shapes::{Circle, LineSegment};
pub use collision::{Collision, CollisionTarget};
pub use common::{BoundedVec, CapacityError};
pub use time::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, SceneConfig, SegmentConfig};
pub use world::{Scene, SpawnError};
