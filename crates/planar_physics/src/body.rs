//! Kinematic body state shared by every shape variant

use crate::field::{ElectricField, GravitationalField};
use planar_math::Vec2;
use slotmap::new_key_type;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the physics world
    ///
    /// Uses generational indexing: once a body is removed, its key never
    /// resolves again, even if the storage slot is reused by a later body.
    pub struct BodyKey;
}

/// Position, velocity, force accumulator and physical properties of a body
///
/// A `Body` carries no geometry. Shape variants own one and add their extent.
///
/// `mass` must be strictly positive: forces and impulses divide by it and
/// nothing here checks. Validate at creation time.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    /// Transient accumulator, zeroed by every `integrate_step`
    acceleration: Vec2,
    mass: f32,
    charge: f32,
    movable: bool,
}

impl Body {
    /// Create a body at rest with unit mass and no charge
    pub fn new(position: Vec2, movable: bool) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: 1.0,
            charge: 0.0,
            movable,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive, got {}", mass);
        self.mass = mass;
        self
    }

    /// Set the charge
    pub fn with_charge(mut self, charge: f32) -> Self {
        self.charge = charge;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn charge(&self) -> f32 {
        self.charge
    }

    #[inline]
    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    pub fn set_mass(&mut self, mass: f32) {
        debug_assert!(mass > 0.0, "body mass must be positive, got {}", mass);
        self.mass = mass;
    }

    pub fn set_charge(&mut self, charge: f32) {
        self.charge = charge;
    }

    pub fn set_movable(&mut self, movable: bool) {
        self.movable = movable;
    }

    /// Accumulate a force: `acceleration += force / mass`
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Accumulate the force of a uniform gravitational field
    ///
    /// The field vector is applied as a force, so it is divided by mass.
    pub fn apply_uniform_field(&mut self, field: &GravitationalField) {
        self.apply_force(field.vector());
    }

    /// Accumulate the force of a uniform electric field: `charge * E`
    pub fn apply_electric_field(&mut self, field: &ElectricField) {
        if self.charge == 0.0 {
            return;
        }
        self.apply_force(field.vector() * self.charge);
    }

    /// Advance one step with semi-implicit Euler and reset the accumulator
    ///
    /// Immovable bodies only have their accumulator cleared. Must be called
    /// exactly once per body per step, after every force has been applied.
    pub fn integrate_step(&mut self, dt: f32) {
        if self.movable {
            self.velocity += self.acceleration * dt;
            self.position += self.velocity * dt;
        }
        self.acceleration = Vec2::ZERO;
    }

    /// Change velocity by an impulse: `velocity += impulse / mass`
    ///
    /// Immovable bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.movable {
            self.velocity += impulse / self.mass;
        }
    }

    /// Kinetic energy `0.5 * m * |v|^2`
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum `m * v`
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }
}
