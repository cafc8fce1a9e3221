//! Force accumulation
//!
//! Pairwise forces (universal gravitation, Coulomb) and uniform fields are
//! added into each body's acceleration accumulator. Nothing here moves a
//! body; integration consumes the accumulated acceleration afterwards.

use crate::body::Body;
use crate::field::{ElectricField, GravitationalField};
use crate::pairs::for_each_pair_mut;
use crate::shapes::Shape;
use planar_math::Vec2;

/// Pairs closer than this are skipped by universal gravitation
pub const DISTANCE_EPSILON: f32 = 0.001;

/// Floor for the squared distance used by the Coulomb force
pub const COULOMB_MIN_DISTANCE_SQ: f32 = 0.01;

/// Largest Coulomb force magnitude applied to a single pair
pub const COULOMB_MAX_FORCE: f32 = 1000.0;

/// Gravitational constant tuned for the viewport-normalized world
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f32 = 0.01;

/// Coulomb constant tuned for the viewport-normalized world
pub const DEFAULT_COULOMB_CONSTANT: f32 = 1.0;

/// Gravitational pull of `b` on `a`
///
/// Returns `None` when the bodies are closer than [`DISTANCE_EPSILON`].
pub fn gravitation_between(a: &Body, b: &Body, gravitational_constant: f32) -> Option<Vec2> {
    let delta = b.position() - a.position();
    let distance = delta.length();
    if distance < DISTANCE_EPSILON {
        return None;
    }

    let magnitude = gravitational_constant * a.mass() * b.mass() / (distance * distance);
    Some(delta / distance * magnitude)
}

/// Coulomb force exerted by `b` on `a`
///
/// Like charges push apart and opposite charges pull together. The squared
/// distance is floored at [`COULOMB_MIN_DISTANCE_SQ`] and the magnitude is
/// clamped to [`COULOMB_MAX_FORCE`]. Returns `None` if either body is
/// uncharged.
pub fn coulomb_between(a: &Body, b: &Body, coulomb_constant: f32) -> Option<Vec2> {
    let charge_product = a.charge() * b.charge();
    if a.charge() == 0.0 || b.charge() == 0.0 {
        return None;
    }

    let delta = b.position() - a.position();
    let distance_sq = delta.length_squared().max(COULOMB_MIN_DISTANCE_SQ);

    // Positive for like charges
    let repulsion =
        (coulomb_constant * charge_product / distance_sq).clamp(-COULOMB_MAX_FORCE, COULOMB_MAX_FORCE);
    let toward_b = delta.normalized();

    Some(toward_b * -repulsion)
}

/// Add universal gravitation between every unordered pair of bodies
///
/// Immovable bodies attract their partners but receive no force themselves.
pub fn apply_pairwise_gravitation(shapes: &mut [Shape], gravitational_constant: f32) {
    for_each_pair_mut(shapes, |a, b| {
        let (a, b) = (a.body_mut(), b.body_mut());
        if let Some(force) = gravitation_between(a, b, gravitational_constant) {
            if a.is_movable() {
                a.apply_force(force);
            }
            if b.is_movable() {
                b.apply_force(-force);
            }
        }
    });
}

/// Add the Coulomb force between every unordered pair of charged bodies
///
/// Only movable bodies receive the force.
pub fn apply_pairwise_coulomb(shapes: &mut [Shape], coulomb_constant: f32) {
    for_each_pair_mut(shapes, |a, b| {
        let (a, b) = (a.body_mut(), b.body_mut());
        if let Some(force) = coulomb_between(a, b, coulomb_constant) {
            if a.is_movable() {
                a.apply_force(force);
            }
            if b.is_movable() {
                b.apply_force(-force);
            }
        }
    });
}

/// Add the uniform gravitational field to every body and the electric field
/// to circles
///
/// Polygons only feel the electric field when `electric_on_polygons` is set.
pub fn apply_uniform_fields(
    shapes: &mut [Shape],
    gravity: &GravitationalField,
    electric: &ElectricField,
    electric_on_polygons: bool,
) {
    for shape in shapes.iter_mut() {
        let feels_electric = match shape {
            Shape::Circle(_) => true,
            Shape::Polygon(_) => electric_on_polygons,
        };

        let body = shape.body_mut();
        body.apply_uniform_field(gravity);
        if feels_electric && electric.is_active() {
            body.apply_electric_field(electric);
        }
    }
}
