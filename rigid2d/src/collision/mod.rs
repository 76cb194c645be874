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
//! Narrow-phase collision detection and response
//!
//! Each supported shape pair has a detector: a plain function that tests two
//! bodies, pushes them apart, exchanges their velocities and fires their
//! collision handlers. The [`CollisionRouter`] maps an ordered pair of
//! shapes to its detector.
//!
//! # Example
//!
//! ```
//! use rigid2d::collision::{CollisionRouter, Tolerances};
//! use rigid2d::{RigidBody, Shape, Vector2D};
//!
//! let router = CollisionRouter::new();
//! let mut a = RigidBody::ellipse(10.0, 10.0);
//! let mut b = RigidBody::ellipse(10.0, 10.0).with_position(Vector2D::new(8.0, 0.0));
//! let contact = router.dispatch(&mut a, &mut b, &Tolerances::default());
//! assert!(contact.is_some());
//! assert!(router.detector(Shape::Rectangle, Shape::Ellipse).is_some());
//! ```

mod correction;
mod ellipse;
mod rect_ellipse;
mod rect_rect;
mod response;

pub use correction::{
    axis_normal, point_in_rect, relative_axis_speed, separation_axis, Axis, Tolerances,
};
pub use ellipse::ellipse_ellipse;
pub use rect_ellipse::{ellipse_rectangle, rectangle_ellipse};
pub use rect_rect::rectangle_rectangle;
pub use response::resolve_velocities;

use crate::body::{RigidBody, Shape};
use crate::math::Vector2D;
use std::fmt;

/// Narrow-phase test for one ordered shape pair
///
/// Returns the contact point when the bodies were found touching and the
/// contact has been handled.
pub type Detector = fn(&mut RigidBody, &mut RigidBody, &Tolerances) -> Option<Vector2D>;

/// Dispatch table from ordered shape pairs to detectors
#[derive(Clone, Copy)]
pub struct CollisionRouter {
    table: [[Option<Detector>; Shape::COUNT]; Shape::COUNT],
}

impl CollisionRouter {
    /// Router with a detector for every shape pair
    pub fn new() -> Self {
        let mut router = Self::empty();
        router.register(Shape::Ellipse, Shape::Ellipse, ellipse_ellipse);
        router.register(Shape::Ellipse, Shape::Rectangle, ellipse_rectangle);
        router.register(Shape::Rectangle, Shape::Ellipse, rectangle_ellipse);
        router.register(Shape::Rectangle, Shape::Rectangle, rectangle_rectangle);
        router
    }

    /// Router with no detectors; every pair is skipped
    pub fn empty() -> Self {
        CollisionRouter {
            table: [[None; Shape::COUNT]; Shape::COUNT],
        }
    }

    /// Install `detector` for the ordered pair `(first, second)`
    pub fn register(&mut self, first: Shape, second: Shape, detector: Detector) {
        self.table[first.index()][second.index()] = Some(detector);
    }

    /// Remove the detector for `(first, second)`, returning it
    pub fn unregister(&mut self, first: Shape, second: Shape) -> Option<Detector> {
        self.table[first.index()][second.index()].take()
    }

    /// Detector for `(first, second)`, if one is registered
    pub fn detector(&self, first: Shape, second: Shape) -> Option<Detector> {
        self.table[first.index()][second.index()]
    }

    /// Run the detector for `(a, b)`
    ///
    /// When that ordering is unmapped or misses and either body is static,
    /// the swapped ordering `(b, a)` is tried as well. Unmapped pairs are
    /// skipped without error. Returns the contact point of whichever
    /// ordering hit.
    pub fn dispatch(
        &self,
        a: &mut RigidBody,
        b: &mut RigidBody,
        tolerances: &Tolerances,
    ) -> Option<Vector2D> {
        let hit = self
            .detector(a.shape(), b.shape())
            .and_then(|detect| detect(a, b, tolerances));
        if hit.is_some() {
            return hit;
        }

        if a.is_static() || b.is_static() {
            if let Some(detect) = self.detector(b.shape(), a.shape()) {
                return detect(b, a, tolerances);
            }
        }
        None
    }
}

impl Default for CollisionRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollisionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shapes = [Shape::Ellipse, Shape::Rectangle];
        let registered: Vec<(Shape, Shape)> = shapes
            .iter()
            .flat_map(|&first| shapes.iter().map(move |&second| (first, second)))
            .filter(|&(first, second)| self.detector(first, second).is_some())
            .collect();
        f.debug_struct("CollisionRouter")
            .field("registered", &registered)
            .finish()
    }
}

/// Broad-phase test: bounding circles overlap and both bodies collide
pub fn bounds_overlap(a: &RigidBody, b: &RigidBody) -> bool {
    a.is_collidable()
        && b.is_collidable()
        && (a.position() - b.position()).magnitude() < a.bounding_radius() + b.bounding_radius()
}

/// Borrow two distinct elements of `bodies` mutably
///
/// # Panics
///
/// Panics if `i == j` or either index is out of bounds.
pub(crate) fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
