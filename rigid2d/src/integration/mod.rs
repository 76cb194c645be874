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
//! Per-tick integration pass
//!
//! Every dynamic body (not deleted, not static, rigid) advances by one
//! explicit Euler step with a unit timestep:
//!
//! ```text
//! velocity += acceleration + gravity
//! position += velocity
//! rotation += rotation_velocity   (then wrapped)
//! ```
//!
//! Bodies are independent during this pass, so with the `parallel` feature
//! the slice can be split across Rayon's thread pool.

use crate::body::RigidBody;
use crate::math::Vector2D;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Advance one body by a single tick
///
/// Returns `true` if the body was dynamic and has been moved.
pub fn integrate_body(body: &mut RigidBody, gravity: Vector2D) -> bool {
    if !body.is_dynamic() {
        return false;
    }
    let acceleration = body.acceleration();
    body.add_velocity(acceleration);
    body.add_velocity(gravity);
    let velocity = body.velocity();
    body.add_position(velocity);
    let spin = body.rotation_velocity();
    body.add_rotation(spin);
    true
}

/// Integrate a slice of bodies sequentially
///
/// Returns the number of bodies updated.
pub fn integrate_all(bodies: &mut [RigidBody], gravity: Vector2D) -> usize {
    bodies
        .iter_mut()
        .map(|body| integrate_body(body, gravity))
        .filter(|&moved| moved)
        .count()
}

/// Integrate a slice of bodies on the Rayon thread pool
///
/// Produces the same state as [`integrate_all`].
#[cfg(feature = "parallel")]
pub fn integrate_all_parallel(bodies: &mut [RigidBody], gravity: Vector2D) -> usize {
    bodies
        .par_iter_mut()
        .map(|body| integrate_body(body, gravity))
        .filter(|&moved| moved)
        .count()
}

/// Kinetic energy of a single body
///
/// KE = 0.5 * m * v². Static bodies report zero.
pub fn kinetic_energy(body: &RigidBody) -> f64 {
    if body.is_static() {
        return 0.0;
    }
    let speed = body.velocity().magnitude();
    0.5 * body.mass() * speed * speed
}

/// Total kinetic energy of all live bodies
pub fn total_kinetic_energy(bodies: &[RigidBody]) -> f64 {
    bodies
        .iter()
        .filter(|body| !body.is_deleted())
        .map(kinetic_energy)
        .sum()
}
