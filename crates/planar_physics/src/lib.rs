//! 2D particle and rigid-body physics for Planar
//!
//! This crate provides the simulation kernel:
//! - Point-mass bodies carrying mass, charge and a movable flag
//! - Uniform gravitational and electric fields
//! - Pairwise universal gravitation and Coulomb forces
//! - Circle and regular-polygon collision shapes
//! - Collision detection (circle, polygon SAT, polygon-circle) and impulse resolution
//! - Viewport boundary containment

pub mod body;
pub mod boundary;
pub mod collision;
pub mod field;
pub mod forces;
pub mod integrator;
mod pairs;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{Body, BodyKey};
pub use boundary::{contain_all, contain_shape, Bounds, DEFAULT_BOUNDARY_RESTITUTION};
pub use collision::{
    check_collision, circle_vs_circle, polygon_vs_circle, polygon_vs_polygon, resolve_collision,
    resolve_collisions, separating_axis, CollisionStats, DEFAULT_RESTITUTION,
};
pub use field::{ElectricField, GravitationalField};
pub use forces::{DEFAULT_COULOMB_CONSTANT, DEFAULT_GRAVITATIONAL_CONSTANT, DISTANCE_EPSILON};
pub use integrator::integrate;
pub use shapes::{Aabb2, Circle, RegularPolygon, Shape, ShapeKind, DEFAULT_CIRCLE_SEGMENTS};
pub use world::{Interactions, PhysicsConfig, PhysicsWorld, StepReport};
