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
//! Velocity response along a contact normal

use crate::body::RigidBody;

/// Exchange velocities between `a` and `b` across a contact
///
/// Both velocities are taken into the frame whose X axis points along
/// `normal_angle`. The X components are reflected (against a static body)
/// or exchanged as a 1D elastic collision weighted by mass, then scaled by
/// the combined elasticity. The Y components are damped by the combined
/// friction. Static bodies keep their velocity untouched.
pub fn resolve_velocities(a: &mut RigidBody, b: &mut RigidBody, normal_angle: f64) {
    let mut va = a.velocity().rotated(-normal_angle);
    let mut vb = b.velocity().rotated(-normal_angle);
    let elasticity = a.elasticity() + b.elasticity();

    if a.is_static() {
        vb.x = -vb.x * elasticity;
    } else if b.is_static() {
        va.x = -va.x * elasticity;
    } else {
        let (ma, mb) = (a.mass(), b.mass());
        let total = ma + mb;
        let (ua, ub) = (va.x, vb.x);
        if total > 0.0 {
            va.x = ((ma - mb) / total * ua + 2.0 * mb / total * ub) * elasticity;
            vb.x = ((mb - ma) / total * ub + 2.0 * ma / total * ua) * elasticity;
        } else {
            // massless pair behaves like equal masses
            va.x = ub * elasticity;
            vb.x = ua * elasticity;
        }
    }

    let friction = a.friction() + b.friction();
    if friction > 0.0 {
        if !a.is_static() {
            va.y *= 1.0 - friction;
        }
        if !b.is_static() {
            vb.y *= 1.0 - friction;
        }
    }

    if !a.is_static() {
        a.set_velocity(va.rotated(normal_angle));
    }
    if !b.is_static() {
        b.set_velocity(vb.rotated(normal_angle));
    }
}
