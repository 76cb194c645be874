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
//! Collision callbacks
//!
//! A body may carry a handler that the simulator invokes for every resolved
//! collision it takes part in. Handlers run synchronously inside the tick and
//! may mutate the body they are attached to, including marking it deleted.

use crate::body::RigidBody;
use crate::math::Vector2D;

/// Extension point invoked after a collision involving the owning body
///
/// Any `Fn(&mut RigidBody, &RigidBody, Vector2D) + Send + Sync` closure
/// implements this trait; `RigidBody::with_on_collide` accepts such a closure
/// directly.
///
/// # Examples
///
/// ```
/// use rigid2d::body::RigidBody;
///
/// let coin = RigidBody::ellipse(8.0, 8.0).with_on_collide(|body, _other, _contact| {
///     body.mark_deleted();
/// });
/// assert!(coin.collision_handler().is_some());
/// ```
pub trait CollisionHandler: Send + Sync {
    /// Called once per resolved collision
    ///
    /// `body` is the body owning this handler, `other` the counterpart, and
    /// `contact` the world-space contact point (identical for both sides).
    fn on_collide(&self, body: &mut RigidBody, other: &RigidBody, contact: Vector2D);
}

impl<F> CollisionHandler for F
where
    F: Fn(&mut RigidBody, &RigidBody, Vector2D) + Send + Sync,
{
    fn on_collide(&self, body: &mut RigidBody, other: &RigidBody, contact: Vector2D) {
        self(body, other, contact)
    }
}
