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
//! Simulator configuration
//!
//! `SimulatorConfig` carries the tunables of a tick: gravity, the epsilon
//! guarding time-of-impact divisions, the separation bias applied after
//! positional correction, and a few behavioural switches. It can be built in
//! code with the `with_*` methods or loaded from JSON.
//!
//! ```
//! use rigid2d::config::SimulatorConfig;
//! use rigid2d::math::Vector2D;
//!
//! let config = SimulatorConfig::from_json(r#"{ "gravity": { "x": 0.0, "y": 0.5 } }"#).unwrap();
//! assert_eq!(config.gravity, Vector2D::new(0.0, 0.5));
//! assert_eq!(config.epsilon, 1e-4);
//! ```

use crate::error::ConfigError;
use crate::math::Vector2D;
use serde::{Deserialize, Serialize};

/// Default guard value substituted for zero relative speeds
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Default bias pushed past the exact contact point after correction
pub const DEFAULT_SEPARATION: f64 = 1e-4;

/// Default body count above which integration runs in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Tunables for a `Simulator`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Acceleration added to every dynamic body's velocity each tick
    pub gravity: Vector2D,
    /// Guard for time-of-impact divisions on an axis with no relative speed
    pub epsilon: f64,
    /// Extra distance pushed past the contact point after correction
    pub separation: f64,
    /// Sort bodies by descending y before each tick
    pub sort_by_height: bool,
    /// Log a warning when a body ends integration with non-finite state
    pub warn_on_invalid_state: bool,
    /// Minimum body count for the parallel integration path
    pub parallel_threshold: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            gravity: Vector2D::zero(),
            epsilon: DEFAULT_EPSILON,
            separation: DEFAULT_SEPARATION,
            sort_by_height: true,
            warn_on_invalid_state: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimulatorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that all numeric settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if !(self.separation >= 0.0 && self.separation.is_finite()) {
            return Err(ConfigError::InvalidSeparation(self.separation));
        }
        if !self.gravity.is_valid() {
            return Err(ConfigError::InvalidGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        Ok(())
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vector2D) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the time-of-impact epsilon
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the separation bias
    pub fn with_separation(mut self, separation: f64) -> Self {
        self.separation = separation;
        self
    }

    /// Enable or disable the height ordering pass
    pub fn with_sort_by_height(mut self, enabled: bool) -> Self {
        self.sort_by_height = enabled;
        self
    }

    /// Enable or disable invalid-state warnings
    pub fn with_invalid_state_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_invalid_state = enabled;
        self
    }

    /// Set the minimum body count for parallel integration
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
