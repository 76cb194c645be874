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
//! The per-frame simulator
//!
//! A tick runs three passes over a slice of bodies:
//!
//! 1. **Order**: stable sort by descending `position.y` so stacked bodies
//!    are resolved from the bottom of the screen up (y grows downward).
//! 2. **Integrate**: advance every dynamic body (see [`crate::integration`]).
//! 3. **Collide**: for each non-static body `i` and every other body `j`,
//!    gate on bounding circles and dispatch `(i, j)` through the
//!    [`CollisionRouter`].
//!
//! The collision pass is sequential and O(n²). Collision handlers run inside
//! it and may mark bodies deleted; deleted bodies are skipped from the next
//! pair on.

use crate::body::RigidBody;
use crate::collision::{bounds_overlap, pair_mut, CollisionRouter, Tolerances};
use crate::config::SimulatorConfig;
use crate::error::ConfigError;
use crate::integration::integrate_all;
use crate::math::Vector2D;
use tracing::{debug_span, trace, warn};

#[cfg(feature = "parallel")]
use crate::integration::integrate_all_parallel;

/// Advances a set of rigid bodies one frame at a time
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    router: CollisionRouter,
}

impl Simulator {
    /// Create a simulator with the given configuration and the full router
    pub fn new(config: SimulatorConfig) -> Self {
        Simulator {
            config,
            router: CollisionRouter::new(),
        }
    }

    /// Create a simulator after validating `config`
    pub fn try_new(config: SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Replace the collision router
    pub fn with_router(mut self, router: CollisionRouter) -> Self {
        self.router = router;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Mutable access to the configuration
    pub fn config_mut(&mut self) -> &mut SimulatorConfig {
        &mut self.config
    }

    /// Gravity applied to every dynamic body each tick
    pub fn gravity(&self) -> Vector2D {
        self.config.gravity
    }

    /// Set gravity
    pub fn set_gravity(&mut self, gravity: impl Into<Vector2D>) {
        self.config.gravity = gravity.into();
    }

    /// The shape-pair dispatch table
    pub fn router(&self) -> &CollisionRouter {
        &self.router
    }

    /// Mutable access to the dispatch table
    pub fn router_mut(&mut self) -> &mut CollisionRouter {
        &mut self.router
    }

    /// Resolution tolerances derived from the configuration
    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            epsilon: self.config.epsilon,
            separation: self.config.separation,
        }
    }

    /// Advance `bodies` by one tick
    ///
    /// Mutates body state in place and invokes collision handlers. With
    /// height ordering enabled the slice is permuted.
    pub fn simulate(&self, bodies: &mut [RigidBody]) {
        let span = debug_span!("simulate", bodies = bodies.len());
        let _enter = span.enter();

        if self.config.sort_by_height {
            order_by_height(bodies);
        }
        self.integrate(bodies);
        if self.config.warn_on_invalid_state {
            report_invalid(bodies);
        }
        self.collide(bodies);
    }

    fn integrate(&self, bodies: &mut [RigidBody]) -> usize {
        let gravity = self.config.gravity;

        #[cfg(feature = "parallel")]
        {
            if bodies.len() >= self.config.parallel_threshold {
                return integrate_all_parallel(bodies, gravity);
            }
        }

        integrate_all(bodies, gravity)
    }

    fn collide(&self, bodies: &mut [RigidBody]) {
        let tolerances = self.tolerances();

        for i in 0..bodies.len() {
            for j in 0..bodies.len() {
                if i == j {
                    continue;
                }
                // handlers may flip these mid-pass
                if bodies[i].is_static() || bodies[i].is_deleted() {
                    break;
                }
                if bodies[j].is_deleted() {
                    continue;
                }

                let (a, b) = pair_mut(bodies, i, j);
                if !bounds_overlap(a, b) {
                    continue;
                }
                if let Some(contact) = self.router.dispatch(a, b, &tolerances) {
                    trace!(
                        i,
                        j,
                        first = ?a.shape(),
                        second = ?b.shape(),
                        %contact,
                        "resolved contact"
                    );
                }
            }
        }
    }
}

/// Stable sort by descending vertical position
///
/// Bodies lower on screen (larger y) come first.
pub fn order_by_height(bodies: &mut [RigidBody]) {
    bodies.sort_by(|a, b| b.position().y.total_cmp(&a.position().y));
}

fn report_invalid(bodies: &[RigidBody]) {
    for (index, body) in bodies.iter().enumerate() {
        if body.is_dynamic() && !body.is_valid() {
            warn!(
                index,
                handle = ?body.handle(),
                position = %body.position(),
                velocity = %body.velocity(),
                "body has non-finite state after integration"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Shape;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_gravity_get_set() {
        let mut sim = Simulator::default();
        assert_eq!(sim.gravity(), Vector2D::zero());
        sim.set_gravity((0.0, 9.8));
        assert_eq!(sim.gravity(), Vector2D::new(0.0, 9.8));
        assert_eq!(sim.config().gravity, Vector2D::new(0.0, 9.8));
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let config = SimulatorConfig::default().with_epsilon(0.0);
        assert!(Simulator::try_new(config).is_err());
        assert!(Simulator::try_new(SimulatorConfig::default()).is_ok());
    }

    #[test]
    fn test_order_by_height_is_stable() {
        let mut bodies: Vec<RigidBody> = [(1.0, 5.0), (2.0, 9.0), (3.0, 5.0), (4.0, -1.0)]
            .iter()
            .map(|&(w, y)| RigidBody::rectangle(w, 1.0).with_position(Vector2D::new(0.0, y)))
            .collect();
        order_by_height(&mut bodies);

        let widths: Vec<f64> = bodies.iter().map(|b| b.width()).collect();
        assert_eq!(widths, vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sorting_can_be_disabled() {
        let sim = Simulator::new(SimulatorConfig::default().with_sort_by_height(false));
        let mut bodies = vec![
            RigidBody::rectangle(1.0, 1.0),
            RigidBody::rectangle(2.0, 1.0).with_position(Vector2D::new(0.0, 50.0)),
        ];
        sim.simulate(&mut bodies);
        assert_eq!(bodies[0].width(), 1.0);
    }

    #[test]
    fn test_static_pairs_never_dispatched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut bodies = vec![
            RigidBody::ellipse(10.0, 10.0)
                .with_static(true)
                .with_on_collide(move |_, _, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            RigidBody::ellipse(10.0, 10.0)
                .with_static(true)
                .with_position(Vector2D::new(1.0, 0.0)),
        ];
        Simulator::default().simulate(&mut bodies);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dynamic_pair_resolved_from_both_sides() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut bodies = vec![
            RigidBody::ellipse(10.0, 10.0)
                .with_rigid_body(false)
                .with_on_collide(move |_, _, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            RigidBody::ellipse(10.0, 10.0)
                .with_rigid_body(false)
                .with_position(Vector2D::new(1.0, 0.0)),
        ];
        Simulator::default().simulate(&mut bodies);
        // once as (i, j) and once as (j, i)
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handler_deletion_skips_later_pairs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut bodies = vec![
            RigidBody::ellipse(10.0, 10.0)
                .with_rigid_body(false)
                .with_on_collide(move |body: &mut RigidBody, _, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    body.mark_deleted();
                }),
            RigidBody::ellipse(10.0, 10.0)
                .with_rigid_body(false)
                .with_position(Vector2D::new(1.0, 0.0)),
            RigidBody::ellipse(10.0, 10.0)
                .with_rigid_body(false)
                .with_position(Vector2D::new(-1.0, 0.0)),
        ];
        let sim = Simulator::new(SimulatorConfig::default().with_sort_by_height(false));
        sim.simulate(&mut bodies);

        assert!(bodies[0].is_deleted());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_router_skips_everything() {
        let sim = Simulator::default().with_router(CollisionRouter::empty());
        let mut bodies = vec![
            RigidBody::ellipse(10.0, 10.0),
            RigidBody::ellipse(10.0, 10.0).with_position(Vector2D::new(1.0, 0.0)),
        ];
        sim.simulate(&mut bodies);
        assert_eq!(bodies[1].position(), Vector2D::new(1.0, 0.0));
        assert!(sim.router().detector(Shape::Ellipse, Shape::Ellipse).is_none());
    }
}
