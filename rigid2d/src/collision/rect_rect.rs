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
//! Oriented rectangle against oriented rectangle
//!
//! The other rectangle's corners are tested one at a time against the first
//! rectangle in its own frame. The first corner found inside decides the
//! contact; a pair where no corner of `b` enters `a` is a miss for this
//! ordering and is left to the swapped retry in the collision pass.

use super::correction::{
    axis_normal, point_in_rect, separate_along, separation_axis, Participant, Tolerances,
};
use super::response::resolve_velocities;
use crate::body::RigidBody;
use crate::math::{sign_non_negative, Vector2D};

/// Corner visiting order, as multiples of the half extents
const CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)];

/// Resolve contact between rectangles `a` and `b`
pub fn rectangle_rectangle(
    a: &mut RigidBody,
    b: &mut RigidBody,
    tolerances: &Tolerances,
) -> Option<Vector2D> {
    let angle = a.rotation();
    let a_pos = a.position().rotated(-angle);
    let b_pos = b.position().rotated(-angle);
    let relative_rotation = b.rotation() - angle;
    let half_b = Vector2D::new(b.width() / 2.0, b.height() / 2.0);

    let Some(corner) = CORNERS
        .iter()
        .map(|&(sx, sy)| Vector2D::new(sx * half_b.x, sy * half_b.y).rotated(relative_rotation) + b_pos)
        .find(|&corner| point_in_rect(a_pos, a.width(), a.height(), corner))
    else {
        return None;
    };

    let normal = corner - b_pos;
    let boundary = Vector2D::new(
        a_pos.x - sign_non_negative(normal.x) * a.width() / 2.0,
        a_pos.y - sign_non_negative(normal.y) * a.height() / 2.0,
    );

    if a.is_rigid_body() && b.is_rigid_body() {
        let intersection = boundary - corner;
        let side_a = Participant {
            velocity: a.velocity().rotated(-angle),
            is_static: a.is_static(),
        };
        let side_b = Participant {
            velocity: b.velocity().rotated(-angle),
            is_static: b.is_static(),
        };

        let axis = separation_axis(
            intersection,
            side_a.velocity,
            side_b.velocity,
            tolerances.epsilon,
        );
        let (offset_a, offset_b) = separate_along(
            side_a,
            side_b,
            axis.of(intersection),
            axis,
            tolerances.separation,
        );
        a.add_position(offset_a.rotated(angle));
        b.add_position(offset_b.rotated(angle));

        let normal_angle = axis_normal(intersection, axis).rotated(angle).angle();
        resolve_velocities(a, b, normal_angle);
    }

    let contact = ((boundary + corner) * 0.5).rotated(angle);
    a.collide(b, contact);
    b.collide(a, contact);
    Some(contact)
}
