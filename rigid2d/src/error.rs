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
//! Error types
//!
//! The simulation tick itself never fails: numeric degeneracies are absorbed
//! with epsilon substitution and unmapped shape pairs are skipped. Errors only
//! surface from configuration loading and handle-based `World` access.

use crate::world::BodyHandle;
use thiserror::Error;

/// Errors raised while building or validating a `SimulatorConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Epsilon must be positive and finite
    #[error("invalid epsilon {0}: must be positive and finite")]
    InvalidEpsilon(f64),
    /// Separation bias must be non-negative and finite
    #[error("invalid separation {0}: must be non-negative and finite")]
    InvalidSeparation(f64),
    /// Gravity must have finite components
    #[error("invalid gravity ({x}, {y}): components must be finite")]
    InvalidGravity {
        /// Horizontal component
        x: f64,
        /// Vertical component
        y: f64,
    },
    /// The JSON document could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by handle-based operations
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// The handle does not refer to a live body
    #[error("no body for handle {0}")]
    UnknownBody(BodyHandle),
}
