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
//! Positional correction shared by the narrow-phase detectors
//!
//! Interpenetration is removed by moving both bodies apart along one axis.
//! The correction is split in proportion to each body's speed on that axis,
//! so the body that drove into the contact backs out of it. Static bodies
//! never absorb any of the correction.

use crate::math::{sign_non_negative, sign_or_zero, Vector2D};

/// Numeric guards used during resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Substituted for zero relative speeds in time-of-impact estimates
    pub epsilon: f64,
    /// Extra distance pushed past the exact contact point
    pub separation: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            epsilon: crate::config::DEFAULT_EPSILON,
            separation: crate::config::DEFAULT_SEPARATION,
        }
    }
}

/// A coordinate axis of the resolution frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
}

impl Axis {
    /// Component of `v` along this axis
    pub fn of(self, v: Vector2D) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Vector with `value` on this axis and zero on the other
    pub fn unit(self, value: f64) -> Vector2D {
        match self {
            Axis::X => Vector2D::new(value, 0.0),
            Axis::Y => Vector2D::new(0.0, value),
        }
    }
}

/// One side of a contact as seen by the correction step
#[derive(Debug, Clone, Copy)]
pub(crate) struct Participant {
    pub velocity: Vector2D,
    pub is_static: bool,
}

/// Speed at which two bodies close or open on one axis
///
/// Bodies moving the same way (or both at rest) get `epsilon`; otherwise
/// the absolute difference of their speeds plus `epsilon`.
pub fn relative_axis_speed(va: f64, vb: f64, epsilon: f64) -> f64 {
    if sign_or_zero(va) != sign_or_zero(vb) {
        (va - vb).abs() + epsilon
    } else {
        epsilon
    }
}

/// Pick the axis the bodies would separate along first
///
/// Time on an axis is `(|intersection| + ε) / relative speed`; ties go to Y.
pub fn separation_axis(intersection: Vector2D, va: Vector2D, vb: Vector2D, epsilon: f64) -> Axis {
    let time_x = (intersection.x.abs() + epsilon) / relative_axis_speed(va.x, vb.x, epsilon);
    let time_y = (intersection.y.abs() + epsilon) / relative_axis_speed(va.y, vb.y, epsilon);
    if time_x < time_y {
        Axis::X
    } else {
        Axis::Y
    }
}

/// Shares of the correction taken by `a` and `b` on `axis`
fn correction_shares(a: Participant, b: Participant, axis: Axis) -> (f64, f64) {
    match (a.is_static, b.is_static) {
        (true, true) => (0.0, 0.0),
        (true, false) => (0.0, 1.0),
        (false, true) => (1.0, 0.0),
        (false, false) => {
            let speed_a = axis.of(a.velocity).abs();
            let speed_b = axis.of(b.velocity).abs();
            let combined = speed_a + speed_b;
            if combined != 0.0 {
                (speed_a / combined, speed_b / combined)
            } else {
                (0.5, 0.5)
            }
        }
    }
}

/// Offsets that separate `a` and `b` along `axis`
///
/// `intersection` points from `a` toward `b`; `a` moves against it and `b`
/// along it, each by its share plus the separation bias. Returned offsets are
/// in the same frame as the inputs.
pub(crate) fn separate_along(
    a: Participant,
    b: Participant,
    intersection: f64,
    axis: Axis,
    separation: f64,
) -> (Vector2D, Vector2D) {
    let (share_a, share_b) = correction_shares(a, b, axis);
    let bias = separation * sign_non_negative(intersection);

    let offset_a = if a.is_static {
        Vector2D::zero()
    } else {
        axis.unit(-intersection * share_a - bias)
    };
    let offset_b = if b.is_static {
        Vector2D::zero()
    } else {
        axis.unit(intersection * share_b + bias)
    };
    (offset_a, offset_b)
}

/// Reduce an intersection vector to its resolution axis
///
/// The other component is zeroed; a zero component on the chosen axis is
/// replaced with `1` on X or `-1` on Y so the normal never degenerates.
pub fn axis_normal(intersection: Vector2D, axis: Axis) -> Vector2D {
    match axis {
        Axis::X if intersection.x == 0.0 => Vector2D::new(1.0, 0.0),
        Axis::X => Vector2D::new(intersection.x, 0.0),
        Axis::Y if intersection.y == 0.0 => Vector2D::new(0.0, -1.0),
        Axis::Y => Vector2D::new(0.0, intersection.y),
    }
}

/// Check whether `point` lies inside the axis-aligned rectangle centred on `center`
pub fn point_in_rect(center: Vector2D, width: f64, height: f64, point: Vector2D) -> bool {
    point.x >= center.x - width / 2.0
        && point.x <= center.x + width / 2.0
        && point.y >= center.y - height / 2.0
        && point.y <= center.y + height / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic(vx: f64, vy: f64) -> Participant {
        Participant {
            velocity: Vector2D::new(vx, vy),
            is_static: false,
        }
    }

    fn fixed() -> Participant {
        Participant {
            velocity: Vector2D::zero(),
            is_static: true,
        }
    }

    #[test]
    fn test_relative_axis_speed() {
        assert_eq!(relative_axis_speed(0.0, 0.0, 1e-4), 1e-4);
        assert_eq!(relative_axis_speed(2.0, 1.0, 1e-4), 1e-4);
        assert_eq!(relative_axis_speed(2.0, -1.0, 0.5), 3.5);
        assert_eq!(relative_axis_speed(0.0, 3.0, 0.0), 3.0);
    }

    #[test]
    fn test_separation_axis_prefers_faster_exit() {
        // shallow on Y and closing vertically
        let axis = separation_axis(
            Vector2D::new(5.0, -1.0),
            Vector2D::zero(),
            Vector2D::new(0.0, 2.0),
            1e-4,
        );
        assert_eq!(axis, Axis::Y);

        // shallow on X and closing horizontally
        let axis = separation_axis(
            Vector2D::new(0.5, 4.0),
            Vector2D::new(1.0, 0.0),
            Vector2D::new(-1.0, 0.0),
            1e-4,
        );
        assert_eq!(axis, Axis::X);
    }

    #[test]
    fn test_split_by_velocity() {
        let (da, db) = separate_along(dynamic(3.0, 0.0), dynamic(-1.0, 0.0), 2.0, Axis::X, 0.0);
        assert_eq!(da, Vector2D::new(-1.5, 0.0));
        assert_eq!(db, Vector2D::new(0.5, 0.0));
    }

    #[test]
    fn test_split_evenly_at_rest() {
        let (da, db) = separate_along(dynamic(0.0, 0.0), dynamic(0.0, 0.0), 2.0, Axis::Y, 0.0);
        assert_eq!(da, Vector2D::new(0.0, -1.0));
        assert_eq!(db, Vector2D::new(0.0, 1.0));
    }

    #[test]
    fn test_static_absorbs_nothing() {
        let (da, db) = separate_along(fixed(), dynamic(0.0, 0.0), -2.0, Axis::Y, 0.1);
        assert_eq!(da, Vector2D::zero());
        assert_eq!(db, Vector2D::new(0.0, -2.1));

        let (da, db) = separate_along(dynamic(0.0, 5.0), fixed(), 2.0, Axis::Y, 0.1);
        assert_eq!(da, Vector2D::new(0.0, -2.1));
        assert_eq!(db, Vector2D::zero());
    }

    #[test]
    fn test_axis_normal_fallbacks() {
        assert_eq!(axis_normal(Vector2D::new(0.0, 3.0), Axis::X), Vector2D::new(1.0, 0.0));
        assert_eq!(axis_normal(Vector2D::new(3.0, 0.0), Axis::Y), Vector2D::new(0.0, -1.0));
        assert_eq!(axis_normal(Vector2D::new(2.0, 3.0), Axis::X), Vector2D::new(2.0, 0.0));
        assert_eq!(axis_normal(Vector2D::new(2.0, 3.0), Axis::Y), Vector2D::new(0.0, 3.0));
    }

    #[test]
    fn test_point_in_rect_edges_inclusive() {
        let center = Vector2D::new(0.0, 0.0);
        assert!(point_in_rect(center, 2.0, 2.0, Vector2D::new(1.0, 1.0)));
        assert!(point_in_rect(center, 2.0, 2.0, Vector2D::new(0.0, 0.0)));
        assert!(!point_in_rect(center, 2.0, 2.0, Vector2D::new(1.01, 0.0)));
        assert!(!point_in_rect(center, 2.0, 2.0, Vector2D::new(0.0, -1.5)));
    }
}
