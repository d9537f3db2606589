pub mod vec2;

pub use vec2::{approx_eq, clamp, distance_squared, dot, projection_on, random_range, random_range_with, Vec2};
