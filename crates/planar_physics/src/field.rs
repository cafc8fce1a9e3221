//! Uniform field descriptions
//!
//! Fields are plain values owned by the caller and passed into each step.
//! Directions are in degrees: 0° points along +x and angles grow
//! counter-clockwise, so 270° points straight down.

use planar_math::Vec2;
use serde::{Deserialize, Serialize};

/// A uniform gravitational field
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitationalField {
    pub magnitude: f32,
    /// Direction in degrees
    pub direction: f32,
}

impl Default for GravitationalField {
    fn default() -> Self {
        Self {
            magnitude: 9.8,
            direction: 270.0,
        }
    }
}

impl GravitationalField {
    pub fn new(magnitude: f32, direction: f32) -> Self {
        Self {
            magnitude,
            direction,
        }
    }

    /// No gravity
    pub fn zero() -> Self {
        Self::new(0.0, 270.0)
    }

    /// Field vector `magnitude * (cos θ, sin θ)`
    pub fn vector(&self) -> Vec2 {
        Vec2::from_angle_degrees(self.direction) * self.magnitude
    }
}

/// A uniform electric field
///
/// `positive` is informational: the sign of the resulting force comes from
/// each body's charge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricField {
    pub magnitude: f32,
    /// Direction in degrees
    pub direction: f32,
    pub positive: bool,
}

impl Default for ElectricField {
    fn default() -> Self {
        Self {
            magnitude: 0.0,
            direction: 0.0,
            positive: true,
        }
    }
}

impl ElectricField {
    pub fn new(magnitude: f32, direction: f32, positive: bool) -> Self {
        Self {
            magnitude,
            direction,
            positive,
        }
    }

    /// Whether this field exerts any force at all
    pub fn is_active(&self) -> bool {
        self.magnitude > 0.0
    }

    /// Field vector `magnitude * (cos θ, sin θ)`
    pub fn vector(&self) -> Vec2 {
        Vec2::from_angle_degrees(self.direction) * self.magnitude
    }
}
