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
//! Collision shapes and rotation wrapping policy

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Collision volume of a body
///
/// Both shapes are sized by the body's width and height. An ellipse collides
/// as a circle of radius `max(width, height) / 2`; a rectangle is oriented by
/// the body's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-independent ellipse
    Ellipse,
    /// Oriented rectangle
    #[default]
    Rectangle,
}

impl Shape {
    /// Number of shape variants, used to size dispatch tables
    pub const COUNT: usize = 2;

    /// Dense index of this shape for table lookups
    pub const fn index(self) -> usize {
        match self {
            Shape::Ellipse => 0,
            Shape::Rectangle => 1,
        }
    }

    /// Bounding radius for a body of this shape with the given extents
    ///
    /// Ellipses use half of the larger extent, rectangles their half-diagonal.
    pub fn bounding_radius(self, width: f64, height: f64) -> f64 {
        match self {
            Shape::Ellipse => width.max(height) / 2.0,
            Shape::Rectangle => ((width / 2.0).powi(2) + (height / 2.0).powi(2)).sqrt(),
        }
    }

    /// Area used for mass derivation
    pub fn area(self, width: f64, height: f64) -> f64 {
        match self {
            Shape::Ellipse => {
                let radius = width.max(height) / 2.0;
                PI * radius * radius
            }
            Shape::Rectangle => width * height,
        }
    }
}

/// How a body's rotation is brought back into `[-2π, 2π]`
///
/// `Reflect` reproduces the historical behaviour where a rotation above 2π
/// becomes `2π - rotation`. This mirrors the angle instead of wrapping it, but
/// existing scenes may depend on it, so it stays the default. `Modulo` wraps
/// with the remainder and keeps the direction of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationWrap {
    /// `rotation > 2π` becomes `2π - rotation`; `rotation < -2π` becomes `rotation + 2π`
    #[default]
    Reflect,
    /// Rotations outside `[-2π, 2π]` are reduced with `rotation % 2π`
    Modulo,
}

impl RotationWrap {
    /// Apply this policy to a rotation in radians
    pub fn apply(self, rotation: f64) -> f64 {
        match self {
            RotationWrap::Reflect => {
                if rotation > TAU {
                    TAU - rotation
                } else if rotation < -TAU {
                    rotation + TAU
                } else {
                    rotation
                }
            }
            RotationWrap::Modulo => {
                if rotation > TAU || rotation < -TAU {
                    rotation % TAU
                } else {
                    rotation
                }
            }
        }
    }
}
