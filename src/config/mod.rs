//! Scene configuration.
//!
//! Every tunable of the simulation is fixed when the scene is built. The
//! defaults reproduce the classic 80 x 60 box with three obstacle
//! segments forming a bowl. A configuration can also be loaded from YAML;
//! missing keys fall back to the defaults:
//!
//! ```yaml
//! gravity: { x: 0.0, y: 10.0 }
//! gravity_scale: 5.0
//! ticks_per_second: 360
//! restitution: 0.6
//! max_circles: 256
//! segments:
//!   - a: { x: 0.0, y: 20.0 }
//!     b: { x: 80.0, y: 40.0 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;
use crate::time::MAX_FRAME_TIME;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "YAML parse error: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid scene configuration: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Endpoints of a static obstacle created at scene initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub a: Vec2,
    pub b: Vec2,
}

impl SegmentConfig {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub gravity: Vec2,
    /// Multiplier applied to `gravity`.
    pub gravity_scale: f64,
    /// Fixed sub-steps per simulated second.
    pub ticks_per_second: u32,
    /// Mass per unit area of spawned circles.
    pub density: f64,
    pub restitution: f64,
    pub max_circles: usize,
    pub max_segments: usize,
    /// Collisions recorded per sub-step; extra ones are dropped.
    pub max_collisions: usize,
    pub bounds_min: Vec2,
    pub bounds_max: Vec2,
    pub correction_percent: f64,
    pub correction_slop: f64,
    pub segments: Vec<SegmentConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let bounds_max = Vec2::new(80.0, 60.0);
        let v0 = Vec2::new(0.0, 20.0);
        let v1 = Vec2::new(15.0, 54.0);
        let v2 = Vec2::new(65.0, 58.0);
        let v3 = Vec2::new(bounds_max.x, 20.0);
        Self {
            gravity: Vec2::new(0.0, 10.0),
            gravity_scale: 5.0,
            ticks_per_second: 360,
            density: 2.0,
            restitution: 0.6,
            max_circles: 256,
            max_segments: 16,
            max_collisions: 1024,
            bounds_min: Vec2::ZERO,
            bounds_max,
            correction_percent: 0.2,
            correction_slop: 0.01,
            segments: vec![
                SegmentConfig::new(v0, v1),
                SegmentConfig::new(v1, v2),
                SegmentConfig::new(v2, v3),
            ],
        }
    }
}

impl SceneConfig {
    /// Default configuration without any obstacle segments.
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            ..Self::default()
        }
    }

    /// Length of one fixed sub-step in seconds.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / f64::from(self.ticks_per_second)
    }

    pub fn scaled_gravity(&self) -> Vec2 {
        self.gravity * self.gravity_scale
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid(reason));

        if self.ticks_per_second == 0 {
            return invalid("ticks_per_second must be positive".to_string());
        }
        if self.fixed_dt() > MAX_FRAME_TIME {
            return invalid(format!(
                "ticks_per_second {} gives a sub-step longer than the {} s frame clamp",
                self.ticks_per_second, MAX_FRAME_TIME
            ));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return invalid(format!("density must be positive and finite, got {}", self.density));
        }
        let finite_vectors = [
            ("gravity", self.gravity),
            ("bounds_min", self.bounds_min),
            ("bounds_max", self.bounds_max),
        ];
        for (name, v) in finite_vectors {
            if !(v.x.is_finite() && v.y.is_finite()) {
                return invalid(format!("{} must be finite, got {:?}", name, v));
            }
        }
        let finite_scalars = [
            ("gravity_scale", self.gravity_scale),
            ("correction_percent", self.correction_percent),
            ("correction_slop", self.correction_slop),
        ];
        for (name, value) in finite_scalars {
            if !value.is_finite() {
                return invalid(format!("{} must be finite, got {}", name, value));
            }
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return invalid(format!("restitution must be within [0, 1], got {}", self.restitution));
        }
        if self.max_circles == 0 {
            return invalid("max_circles must be positive".to_string());
        }
        if self.max_collisions == 0 {
            return invalid("max_collisions must be positive".to_string());
        }
        if !(self.bounds_min.x < self.bounds_max.x && self.bounds_min.y < self.bounds_max.y) {
            return invalid(format!(
                "bounds_min {:?} must be below bounds_max {:?} on both axes",
                self.bounds_min, self.bounds_max
            ));
        }
        if self.correction_percent < 0.0 || self.correction_slop < 0.0 {
            return invalid("correction_percent and correction_slop must not be negative".to_string());
        }
        if self.segments.len() > self.max_segments {
            return invalid(format!(
                "{} segments configured but max_segments is {}",
                self.segments.len(),
                self.max_segments
            ));
        }
        Ok(())
    }
}
