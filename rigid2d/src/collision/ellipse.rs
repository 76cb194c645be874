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
//! Circle against circle
//!
//! Ellipse bodies collide as circles of radius `max(width, height) / 2`.

use super::correction::{separate_along, Axis, Participant, Tolerances};
use super::response::resolve_velocities;
use crate::body::RigidBody;
use crate::math::Vector2D;

/// Resolve contact between two ellipse bodies
///
/// Always reports a hit: the broad phase already established overlap of the
/// bounding circles, which for ellipses are the collision circles. Returns
/// the point on `b`'s surface along the normal.
pub fn ellipse_ellipse(
    a: &mut RigidBody,
    b: &mut RigidBody,
    tolerances: &Tolerances,
) -> Option<Vector2D> {
    let normal = b.position() - a.position();
    let angle = normal.angle();

    if a.is_rigid_body() && b.is_rigid_body() {
        let overlap = (a.radius() + b.radius() - normal.magnitude()).abs();
        let intersection = Vector2D::new(overlap, 0.0).rotated(angle);

        let pa = Participant {
            velocity: a.velocity(),
            is_static: a.is_static(),
        };
        let pb = Participant {
            velocity: b.velocity(),
            is_static: b.is_static(),
        };
        for axis in [Axis::X, Axis::Y] {
            let (offset_a, offset_b) = separate_along(
                pa,
                pb,
                axis.of(intersection),
                axis,
                tolerances.separation,
            );
            a.add_position(offset_a);
            b.add_position(offset_b);
        }

        resolve_velocities(a, b, angle);
    }

    let contact = Vector2D::new(b.radius(), 0.0).rotated(angle) + b.position();
    a.collide(b, contact);
    b.collide(a, contact);
    Some(contact)
}
