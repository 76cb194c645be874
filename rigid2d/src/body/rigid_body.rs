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
//! Rigid body state and material properties
//!
//! A `RigidBody` bundles the kinematic state the simulator integrates
//! (position, velocity, rotation) with the material properties collision
//! resolution reads (mass, elasticity, friction). Mass and bounding radius
//! are derived values and are recomputed whenever width, height, density or
//! shape changes.

use crate::body::{CollisionHandler, RotationWrap, Shape};
use crate::math::Vector2D;
use crate::world::BodyHandle;
use std::fmt;
use std::sync::Arc;

/// A simulated 2D body
///
/// Defaults: rectangle, zero extents, density 1, collidable, dynamic, rigid,
/// zero elasticity and friction.
///
/// # Examples
///
/// ```
/// use rigid2d::body::{RigidBody, Shape};
/// use rigid2d::math::Vector2D;
///
/// let crate_box = RigidBody::rectangle(2.0, 3.0)
///     .with_density(4.0)
///     .with_position(Vector2D::new(10.0, 0.0));
///
/// assert_eq!(crate_box.shape(), Shape::Rectangle);
/// assert_eq!(crate_box.mass(), 24.0);
/// ```
#[derive(Clone)]
pub struct RigidBody {
    handle: Option<BodyHandle>,
    position: Vector2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    rotation: f64,
    rotation_velocity: f64,
    rotation_wrap: RotationWrap,
    width: f64,
    height: f64,
    bounding_radius: f64,
    density: f64,
    mass: f64,
    shape: Shape,
    elasticity: f64,
    friction: f64,
    is_static: bool,
    is_rigid_body: bool,
    is_collidable: bool,
    deleted: bool,
    handler: Option<Arc<dyn CollisionHandler>>,
}

impl RigidBody {
    /// Create a body with default properties
    pub fn new() -> Self {
        RigidBody {
            handle: None,
            position: Vector2D::zero(),
            velocity: Vector2D::zero(),
            acceleration: Vector2D::zero(),
            rotation: 0.0,
            rotation_velocity: 0.0,
            rotation_wrap: RotationWrap::default(),
            width: 0.0,
            height: 0.0,
            bounding_radius: 0.0,
            density: 1.0,
            mass: 0.0,
            shape: Shape::default(),
            elasticity: 0.0,
            friction: 0.0,
            is_static: false,
            is_rigid_body: true,
            is_collidable: true,
            deleted: false,
            handler: None,
        }
    }

    /// Create an ellipse body with the given extents
    pub fn ellipse(width: f64, height: f64) -> Self {
        RigidBody::new().with_shape(Shape::Ellipse).with_size(width, height)
    }

    /// Create a rectangle body with the given extents
    pub fn rectangle(width: f64, height: f64) -> Self {
        RigidBody::new().with_shape(Shape::Rectangle).with_size(width, height)
    }

    // ----- chainable configuration -----

    /// Set the position (center of mass)
    pub fn with_position(mut self, position: Vector2D) -> Self {
        self.position = position;
        self
    }

    /// Set the velocity
    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the per-tick acceleration
    pub fn with_acceleration(mut self, acceleration: Vector2D) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Set the rotation in radians
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Set the rotation velocity in radians per tick
    pub fn with_rotation_velocity(mut self, rotation_velocity: f64) -> Self {
        self.rotation_velocity = rotation_velocity;
        self
    }

    /// Set the rotation wrapping policy
    pub fn with_rotation_wrap(mut self, wrap: RotationWrap) -> Self {
        self.rotation_wrap = wrap;
        self
    }

    /// Set width and height
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.set_size(width, height);
        self
    }

    /// Set the collision shape
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.set_shape(shape);
        self
    }

    /// Set the density
    pub fn with_density(mut self, density: f64) -> Self {
        self.set_density(density);
        self
    }

    /// Set the elasticity coefficient
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Set the friction coefficient
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Mark the body static (immovable, still collides)
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Enable or disable integration and collision response
    pub fn with_rigid_body(mut self, is_rigid_body: bool) -> Self {
        self.is_rigid_body = is_rigid_body;
        self
    }

    /// Enable or disable collision checks for this body
    pub fn with_collidable(mut self, is_collidable: bool) -> Self {
        self.is_collidable = is_collidable;
        self
    }

    /// Attach a collision handler
    pub fn with_collision_handler<H: CollisionHandler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Attach a closure as collision handler
    pub fn with_on_collide<F>(self, on_collide: F) -> Self
    where
        F: Fn(&mut RigidBody, &RigidBody, Vector2D) + Send + Sync + 'static,
    {
        self.with_collision_handler(on_collide)
    }

    // ----- identity -----

    /// Handle assigned by the owning `World`, if any
    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    pub(crate) fn set_handle(&mut self, handle: Option<BodyHandle>) {
        self.handle = handle;
    }

    // ----- kinematics -----

    /// Center of mass in world space
    pub fn position(&self) -> Vector2D {
        self.position
    }

    /// Set the center of mass
    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
    }

    /// Translate the body
    pub fn add_position(&mut self, offset: Vector2D) {
        self.position += offset;
    }

    /// Translate the body horizontally
    pub fn add_position_x(&mut self, dx: f64) {
        self.position.x += dx;
    }

    /// Translate the body vertically
    pub fn add_position_y(&mut self, dy: f64) {
        self.position.y += dy;
    }

    /// Top-left corner of the unrotated bounds, `position - (width, height) / 2`
    pub fn base_position(&self) -> Vector2D {
        Vector2D::new(
            self.position.x - self.width / 2.0,
            self.position.y - self.height / 2.0,
        )
    }

    /// Place the body by its top-left corner
    pub fn set_base_position(&mut self, base: Vector2D) {
        self.position = Vector2D::new(base.x + self.width / 2.0, base.y + self.height / 2.0);
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }

    /// Add to the velocity
    pub fn add_velocity(&mut self, delta: Vector2D) {
        self.velocity += delta;
    }

    /// Per-tick acceleration
    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    /// Set the per-tick acceleration
    pub fn set_acceleration(&mut self, acceleration: Vector2D) {
        self.acceleration = acceleration;
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the rotation in radians, applying the body's wrap policy
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = self.rotation_wrap.apply(rotation);
    }

    /// Set the rotation in degrees
    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.set_rotation(degrees.to_radians());
    }

    /// Rotate by `delta` radians, applying the wrap policy
    pub fn add_rotation(&mut self, delta: f64) {
        self.set_rotation(self.rotation + delta);
    }

    /// Rotate by `degrees`, applying the wrap policy
    pub fn add_rotation_degrees(&mut self, degrees: f64) {
        self.add_rotation(degrees.to_radians());
    }

    /// Rotation velocity in radians per tick
    pub fn rotation_velocity(&self) -> f64 {
        self.rotation_velocity
    }

    /// Set the rotation velocity in radians per tick
    pub fn set_rotation_velocity(&mut self, rotation_velocity: f64) {
        self.rotation_velocity = rotation_velocity;
    }

    /// Set the rotation velocity in degrees per tick
    pub fn set_rotation_velocity_degrees(&mut self, degrees: f64) {
        self.rotation_velocity = degrees.to_radians();
    }

    /// Rotation wrapping policy
    pub fn rotation_wrap(&self) -> RotationWrap {
        self.rotation_wrap
    }

    /// Change the rotation wrapping policy
    pub fn set_rotation_wrap(&mut self, wrap: RotationWrap) {
        self.rotation_wrap = wrap;
    }

    // ----- geometry and derived values -----

    /// Width of the bounding extents
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Set the width and recompute derived values
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.recompute_derived();
    }

    /// Height of the bounding extents
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Set the height and recompute derived values
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.recompute_derived();
    }

    /// Set width and height together
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.recompute_derived();
    }

    /// Collision shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Set the collision shape and recompute derived values
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.recompute_derived();
    }

    /// Density used for mass derivation
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Set the density and recompute derived values
    pub fn set_density(&mut self, density: f64) {
        self.density = density;
        self.recompute_derived();
    }

    /// Mass, `density * area`
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Radius of the broad-phase bounding circle
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    /// Collision radius of an ellipse body (half of the larger extent)
    ///
    /// Same as `bounding_radius` for ellipses.
    pub fn radius(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }

    fn recompute_derived(&mut self) {
        self.bounding_radius = self.shape.bounding_radius(self.width, self.height);
        self.mass = self.shape.area(self.width, self.height) * self.density;
    }

    // ----- material -----

    /// Elasticity coefficient
    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    /// Set the elasticity coefficient
    pub fn set_elasticity(&mut self, elasticity: f64) {
        self.elasticity = elasticity;
    }

    /// Friction coefficient
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Set the friction coefficient
    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }

    // ----- flags -----

    /// Whether the body is immovable
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Mark the body static or dynamic
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    /// Whether the body is integrated and receives collision response
    pub fn is_rigid_body(&self) -> bool {
        self.is_rigid_body
    }

    /// Enable or disable integration and collision response
    pub fn set_rigid_body(&mut self, is_rigid_body: bool) {
        self.is_rigid_body = is_rigid_body;
    }

    /// Whether the body takes part in collision checks
    pub fn is_collidable(&self) -> bool {
        self.is_collidable
    }

    /// Enable or disable collision checks
    pub fn set_collidable(&mut self, is_collidable: bool) {
        self.is_collidable = is_collidable;
    }

    /// Whether the body is marked for removal
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Mark the body for removal by its owner
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Whether the integration pass moves this body
    pub fn is_dynamic(&self) -> bool {
        !self.deleted && !self.is_static && self.is_rigid_body
    }

    /// Check that position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid() && self.rotation.is_finite()
    }

    // ----- collision hook -----

    /// Attached collision handler, if any
    pub fn collision_handler(&self) -> Option<&Arc<dyn CollisionHandler>> {
        self.handler.as_ref()
    }

    /// Replace the collision handler
    pub fn set_collision_handler(&mut self, handler: Option<Arc<dyn CollisionHandler>>) {
        self.handler = handler;
    }

    /// Invoke this body's handler for a collision with `other`
    pub fn collide(&mut self, other: &RigidBody, contact: Vector2D) {
        if let Some(handler) = self.handler.clone() {
            handler.on_collide(self, other, contact);
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RigidBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RigidBody")
            .field("handle", &self.handle)
            .field("shape", &self.shape)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("rotation", &self.rotation)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mass", &self.mass)
            .field("is_static", &self.is_static)
            .field("is_rigid_body", &self.is_rigid_body)
            .field("is_collidable", &self.is_collidable)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{PI, TAU};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_defaults() {
        let body = RigidBody::new();
        assert_eq!(body.shape(), Shape::Rectangle);
        assert_eq!(body.density(), 1.0);
        assert_eq!(body.mass(), 0.0);
        assert!(body.is_collidable());
        assert!(body.is_rigid_body());
        assert!(!body.is_static());
        assert!(!body.is_deleted());
        assert!(body.handle().is_none());
    }

    #[test]
    fn test_rectangle_mass_and_radius() {
        let mut body = RigidBody::rectangle(6.0, 8.0).with_density(0.5);
        assert_eq!(body.mass(), 24.0);
        assert_eq!(body.bounding_radius(), 5.0);

        body.set_width(2.0);
        assert_eq!(body.mass(), 8.0);
        body.set_height(1.0);
        assert_eq!(body.mass(), 1.0);
    }

    #[test]
    fn test_ellipse_mass_uses_larger_extent() {
        let body = RigidBody::ellipse(4.0, 2.0).with_density(2.0);
        assert_abs_diff_eq!(body.mass(), PI * 4.0 * 2.0, epsilon = 1e-12);
        assert_eq!(body.bounding_radius(), 2.0);
        assert_eq!(body.radius(), 2.0);
    }

    #[test]
    fn test_shape_change_recomputes() {
        let mut body = RigidBody::rectangle(2.0, 2.0);
        assert_eq!(body.mass(), 4.0);
        body.set_shape(Shape::Ellipse);
        assert_abs_diff_eq!(body.mass(), PI, epsilon = 1e-12);
        assert_eq!(body.bounding_radius(), 1.0);
    }

    #[test]
    fn test_base_position_round_trip() {
        let mut body = RigidBody::rectangle(4.0, 2.0).with_position(Vector2D::new(10.0, 10.0));
        assert_eq!(body.base_position(), Vector2D::new(8.0, 9.0));
        body.set_base_position(Vector2D::new(0.0, 0.0));
        assert_eq!(body.position(), Vector2D::new(2.0, 1.0));
    }

    #[test]
    fn test_rotation_degrees() {
        let mut body = RigidBody::new();
        body.set_rotation_degrees(90.0);
        assert_abs_diff_eq!(body.rotation(), PI / 2.0, epsilon = 1e-12);
        body.add_rotation_degrees(90.0);
        assert_abs_diff_eq!(body.rotation(), PI, epsilon = 1e-12);
        body.set_rotation_velocity_degrees(180.0);
        assert_abs_diff_eq!(body.rotation_velocity(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_wrap_policies() {
        let mut reflect = RigidBody::new().with_rotation(TAU - 0.1);
        reflect.add_rotation(0.3);
        assert_abs_diff_eq!(reflect.rotation(), -0.2, epsilon = 1e-12);

        let mut modulo = RigidBody::new()
            .with_rotation_wrap(RotationWrap::Modulo)
            .with_rotation(TAU - 0.1);
        modulo.add_rotation(0.3);
        assert_abs_diff_eq!(modulo.rotation(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_collide_invokes_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut body = RigidBody::ellipse(2.0, 2.0).with_on_collide(move |body, _other, contact| {
            seen.fetch_add(1, Ordering::SeqCst);
            body.set_position(contact);
        });
        let other = RigidBody::rectangle(1.0, 1.0);

        body.collide(&other, Vector2D::new(3.0, 4.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(body.position(), Vector2D::new(3.0, 4.0));
    }

    #[test]
    fn test_collide_without_handler_is_noop() {
        let mut body = RigidBody::rectangle(1.0, 1.0);
        let other = body.clone();
        body.collide(&other, Vector2D::zero());
        assert_eq!(body.position(), Vector2D::zero());
    }

    #[test]
    fn test_is_dynamic() {
        assert!(RigidBody::new().is_dynamic());
        assert!(!RigidBody::new().with_static(true).is_dynamic());
        assert!(!RigidBody::new().with_rigid_body(false).is_dynamic());
        let mut deleted = RigidBody::new();
        deleted.mark_deleted();
        assert!(!deleted.is_dynamic());
    }
}
