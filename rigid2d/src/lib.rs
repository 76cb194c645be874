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
//! # rigid2d
//!
//! A per-frame 2D rigid-body simulator. Bodies are circles (ellipse shape)
//! or oriented rectangles; each tick integrates motion under gravity, finds
//! overlapping pairs and resolves them with a single contact point per pair.
//!
//! Coordinates follow screen conventions: y grows downward, so a positive
//! gravity pulls bodies toward the bottom.
//!
//! ## Features
//!
//! - **Shape-pair dispatch**: a replaceable router from shape pairs to detectors
//! - **Positional correction**: velocity-weighted split with a separation bias
//! - **Velocity response**: mass-weighted restitution with friction damping
//! - **Collision hooks**: per-body handlers that may mutate or delete bodies
//! - **Parallelization**: optional Rayon integration pass for large scenes
//!
//! ## Example
//!
//! ```rust
//! use rigid2d::{RigidBody, Simulator, SimulatorConfig, Vector2D};
//!
//! let sim = Simulator::new(SimulatorConfig::default().with_gravity(Vector2D::new(0.0, 0.5)));
//! let mut bodies = vec![
//!     RigidBody::rectangle(200.0, 20.0)
//!         .with_position(Vector2D::new(0.0, 100.0))
//!         .with_static(true),
//!     RigidBody::rectangle(20.0, 20.0).with_position(Vector2D::new(0.0, 60.0)),
//! ];
//!
//! for _ in 0..120 {
//!     sim.simulate(&mut bodies);
//! }
//!
//! // the ground sorts first and never moves
//! assert_eq!(bodies[0].position(), Vector2D::new(0.0, 100.0));
//! assert!(bodies[1].position().y <= 80.0 + 1e-3);
//! ```

#![warn(missing_docs)]

/// Vector math
pub mod math;

/// Rigid bodies and collision hooks
pub mod body;

/// Narrow-phase detection and response
pub mod collision;

/// Per-tick integration pass
pub mod integration;

/// The simulator tick
pub mod simulator;

/// Body storage with stable handles
pub mod world;

/// Simulator configuration
pub mod config;

/// Error types
pub mod error;

pub use body::{CollisionHandler, RigidBody, RotationWrap, Shape};
pub use collision::CollisionRouter;
pub use config::SimulatorConfig;
pub use error::{ConfigError, PhysicsError};
pub use math::Vector2D;
pub use simulator::Simulator;
pub use world::{BodyHandle, World};
