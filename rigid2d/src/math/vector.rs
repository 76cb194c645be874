// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Two-dimensional vector value type
//!
//! `Vector2D` is a plain `Copy` value. Every operation comes in a pure form
//! (returns a new vector) and, where it reads naturally, an in-place form.
//! Angles are in radians throughout.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use rigid2d::math::Vector2D;
///
/// let v = Vector2D::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
///
/// let w = v + Vector2D::new(1.0, 1.0);
/// assert_eq!(w, Vector2D::new(4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vector2D {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector2D::new(0.0, 0.0)
    }

    /// Pure two-argument sum, `one + other`
    pub fn sum(one: Vector2D, other: Vector2D) -> Vector2D {
        Vector2D::new(one.x + other.x, one.y + other.y)
    }

    /// Pure two-argument difference, `one - other`
    pub fn subtract(one: Vector2D, other: Vector2D) -> Vector2D {
        Vector2D::new(one.x - other.x, one.y - other.y)
    }

    /// Add `other` to this vector in place
    pub fn add_to(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }

    /// Subtract `other` from this vector in place
    pub fn subtract_from(&mut self, other: Vector2D) {
        self.x -= other.x;
        self.y -= other.y;
    }

    /// Overwrite both components
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Multiply both components by `factor` in place
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }

    /// Return a copy multiplied by `factor`
    pub fn scaled(self, factor: f64) -> Vector2D {
        Vector2D::new(self.x * factor, self.y * factor)
    }

    /// Rotate in place by `angle` radians (counter-clockwise for a y-up frame)
    pub fn rotate(&mut self, angle: f64) {
        *self = self.rotated(angle);
    }

    /// Return a copy rotated by `angle` radians
    ///
    /// Applies the standard rotation matrix
    /// `[cos -sin; sin cos]` to the vector.
    pub fn rotated(self, angle: f64) -> Vector2D {
        let (sin, cos) = angle.sin_cos();
        Vector2D::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Euclidean length, `sqrt(x² + y²)`
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Direction of the vector as an angle in `[0, 2π)`
    ///
    /// Computed quadrant by quadrant from `atan(|y / x|)`. Vectors on the
    /// vertical axis are handled explicitly (π/2 or 3π/2) so no division by
    /// zero happens; the zero vector has angle `0`.
    pub fn angle(&self) -> f64 {
        if self.x == 0.0 {
            return if self.y > 0.0 {
                FRAC_PI_2
            } else if self.y < 0.0 {
                3.0 * FRAC_PI_2
            } else {
                0.0
            };
        }

        let reference = (self.y / self.x).abs().atan();
        if self.x < 0.0 && self.y >= 0.0 {
            PI - reference
        } else if self.x < 0.0 {
            PI + reference
        } else if self.y < 0.0 {
            let angle = TAU - reference;
            // a tiny negative y rounds up to exactly 2π
            if angle >= TAU { 0.0 } else { angle }
        } else {
            reference
        }
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Sign of `value` with zero mapped to zero (`-1.0`, `0.0` or `1.0`)
///
/// Unlike `f64::signum`, `+0.0` and `-0.0` both yield `0.0`, so two bodies at
/// rest on an axis compare as moving "the same way".
pub fn sign_or_zero(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Sign of `value` with zero treated as positive (`-1.0` or `1.0`)
pub fn sign_non_negative(value: f64) -> f64 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::sum(self, rhs)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.add_to(rhs);
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::subtract(self, rhs)
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.subtract_from(rhs);
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scaled(rhs)
    }
}

impl MulAssign<f64> for Vector2D {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale(rhs);
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2D::new(x, y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_arithmetic() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -1.0);
        assert_eq!(a + b, Vector2D::new(4.0, 1.0));
        assert_eq!(a - b, Vector2D::new(-2.0, 3.0));
        assert_eq!(Vector2D::sum(a, b), a + b);
        assert_eq!(Vector2D::subtract(a, b), a - b);
        assert_eq!(-a, Vector2D::new(-1.0, -2.0));

        let mut c = a;
        c.add_to(b);
        c.subtract_from(Vector2D::new(1.0, 1.0));
        assert_eq!(c, Vector2D::new(3.0, 0.0));
    }

    #[test]
    fn test_scale() {
        let mut v = Vector2D::new(2.0, -3.0);
        v.scale(0.5);
        assert_eq!(v, Vector2D::new(1.0, -1.5));
        assert_eq!(v * 2.0, Vector2D::new(2.0, -3.0));
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector2D::new(3.0, 4.0).magnitude(), 5.0); // 3-4-5 triangle
        assert_eq!(Vector2D::zero().magnitude(), 0.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut v = Vector2D::new(1.0, 0.0);
        v.rotate(FRAC_PI_2);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_axes() {
        assert_eq!(Vector2D::new(1.0, 0.0).angle(), 0.0);
        assert_eq!(Vector2D::new(0.0, 2.0).angle(), FRAC_PI_2);
        assert_eq!(Vector2D::new(-3.0, 0.0).angle(), PI);
        assert_eq!(Vector2D::new(0.0, -0.5).angle(), 3.0 * FRAC_PI_2);
        assert_eq!(Vector2D::zero().angle(), 0.0);
    }

    #[test]
    fn test_angle_quadrants() {
        assert_abs_diff_eq!(Vector2D::new(1.0, 1.0).angle(), PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Vector2D::new(-1.0, 1.0).angle(), 3.0 * PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Vector2D::new(-1.0, -1.0).angle(), 5.0 * PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Vector2D::new(1.0, -1.0).angle(), 7.0 * PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signs() {
        assert_eq!(sign_or_zero(0.0), 0.0);
        assert_eq!(sign_or_zero(-0.0), 0.0);
        assert_eq!(sign_or_zero(2.5), 1.0);
        assert_eq!(sign_or_zero(-2.5), -1.0);
        assert_eq!(sign_non_negative(0.0), 1.0);
        assert_eq!(sign_non_negative(-1e-9), -1.0);
    }

    #[test]
    fn test_validation() {
        assert!(Vector2D::new(1.0, 2.0).is_valid());
        assert!(!Vector2D::new(f64::NAN, 2.0).is_valid());
        assert!(!Vector2D::new(1.0, f64::INFINITY).is_valid());
    }
}
