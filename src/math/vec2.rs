use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Tolerance shared by `normalize` and `approx_eq`.
pub const EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the dot product of two vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Calculates the squared length of the vector.
    /// Useful for comparisons as it avoids a square root.
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Calculates the length of the vector.
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Rotates the vector in place by `radians` (counter-clockwise for a y-up frame).
    pub fn rotate_self(&mut self, radians: f64) {
        let (sin_a, cos_a) = radians.sin_cos();
        let x = self.x * cos_a - self.y * sin_a;
        let y = self.x * sin_a + self.y * cos_a;
        self.x = x;
        self.y = y;
    }

    /// Returns the vector rotated by `radians`.
    pub fn rotate(self, radians: f64) -> Self {
        let mut v = self;
        v.rotate_self(radians);
        v
    }

    /// Scales the vector to unit length in place.
    ///
    /// Vectors no longer than [`EPSILON`] are left untouched, so a zero
    /// vector stays zero instead of turning into NaN.
    pub fn normalize_self(&mut self) {
        let len = self.length();
        if len > EPSILON {
            let inv_len = 1.0 / len;
            self.x *= inv_len;
            self.y *= inv_len;
        }
    }

    /// Returns a unit-length copy of the vector, see [`Vec2::normalize_self`].
    pub fn normalize(self) -> Self {
        let mut v = self;
        v.normalize_self();
        v
    }

    /// Calculates the squared distance between two points.
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Calculates the distance between two points.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Scalar projection of this vector onto `axis`. The axis does not need
    /// to be unit length.
    pub fn projection_on(self, axis: Self) -> f64 {
        self.dot(axis.normalize())
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

// Broadcast a scalar to both components
impl Add<f64> for Vec2 {
    type Output = Self;

    fn add(self, scalar: f64) -> Self {
        Self::new(self.x + scalar, self.y + scalar)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, vec: Vec2) -> Vec2 {
        vec * self
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.dot(b)
}

pub fn distance_squared(a: Vec2, b: Vec2) -> f64 {
    a.distance_squared(b)
}

pub fn projection_on(v: Vec2, axis: Vec2) -> f64 {
    v.projection_on(axis)
}

/// True when `a` and `b` differ by at most [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Clamps `value` to `[min, max]`. Unlike `f64::clamp` this never panics
/// when the bounds are swapped; `min` wins in that case.
pub fn clamp(min: f64, max: f64, value: f64) -> f64 {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

/// Uniform random float in `[low, high]` drawn from the thread-local generator.
pub fn random_range(low: f64, high: f64) -> f64 {
    random_range_with(&mut rand::rng(), low, high)
}

/// Like [`random_range`] but with a caller supplied generator, so seeded
/// runs are reproducible.
pub fn random_range_with<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    let t: f64 = rng.random();
    (high - low) * t + low
}
