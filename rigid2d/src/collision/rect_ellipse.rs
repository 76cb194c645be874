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
//! Oriented rectangle against circle
//!
//! The test runs in the rectangle's local frame: both positions and
//! velocities are rotated by the negated rectangle rotation, the circle
//! centre is checked against the rectangle grown by the circle radius on
//! every side, and any correction is rotated back into world space before it
//! is applied.

use super::correction::{
    axis_normal, point_in_rect, separate_along, separation_axis, Participant, Tolerances,
};
use super::response::resolve_velocities;
use crate::body::RigidBody;
use crate::math::{sign_non_negative, Vector2D};

/// Resolve contact between a rectangle `rect` and an ellipse `ellipse`
///
/// Returns the contact point, or `None` when the circle centre lies outside
/// the expanded rectangle.
pub fn rectangle_ellipse(
    rect: &mut RigidBody,
    ellipse: &mut RigidBody,
    tolerances: &Tolerances,
) -> Option<Vector2D> {
    let angle = rect.rotation();
    let rect_pos = rect.position().rotated(-angle);
    let ellipse_pos = ellipse.position().rotated(-angle);
    let radius = ellipse.radius();

    if !point_in_rect(
        rect_pos,
        rect.width() + 2.0 * radius,
        rect.height() + 2.0 * radius,
        ellipse_pos,
    ) {
        return None;
    }

    let normal = rect_pos - ellipse_pos;
    let boundary = Vector2D::new(
        rect_pos.x - sign_non_negative(normal.x) * (rect.width() / 2.0 + radius),
        rect_pos.y - sign_non_negative(normal.y) * (rect.height() / 2.0 + radius),
    );
    let intersection = boundary - ellipse_pos;

    if rect.is_rigid_body() && ellipse.is_rigid_body() {
        let rect_side = Participant {
            velocity: rect.velocity().rotated(-angle),
            is_static: rect.is_static(),
        };
        let ellipse_side = Participant {
            velocity: ellipse.velocity().rotated(-angle),
            is_static: ellipse.is_static(),
        };

        let axis = separation_axis(
            intersection,
            rect_side.velocity,
            ellipse_side.velocity,
            tolerances.epsilon,
        );
        let component = axis.of(intersection);
        let (offset_rect, offset_ellipse) = separate_along(
            rect_side,
            ellipse_side,
            component,
            axis,
            tolerances.separation,
        );
        rect.add_position(offset_rect.rotated(angle));
        ellipse.add_position(offset_ellipse.rotated(angle));

        let normal_angle = axis_normal(intersection, axis).rotated(angle).angle();
        resolve_velocities(rect, ellipse, normal_angle);
    }

    let local_contact = if intersection.x.abs() < intersection.y.abs() {
        Vector2D::new(boundary.x, ellipse_pos.y)
    } else {
        Vector2D::new(ellipse_pos.x, boundary.y)
    };
    let contact = local_contact.rotated(angle);

    rect.collide(ellipse, contact);
    ellipse.collide(rect, contact);
    Some(contact)
}

/// Resolve contact between an ellipse and a rectangle
///
/// Delegates to [`rectangle_ellipse`] with the operands swapped.
pub fn ellipse_rectangle(
    ellipse: &mut RigidBody,
    rect: &mut RigidBody,
    tolerances: &Tolerances,
) -> Option<Vector2D> {
    rectangle_ellipse(rect, ellipse, tolerances)
}
