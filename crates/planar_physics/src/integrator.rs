//! Explicit time integration

use crate::shapes::Shape;

/// Advance every shape by `dt` using its accumulated acceleration
///
/// Uses semi-implicit Euler (velocity first, then position) and leaves every
/// accumulator at zero. `dt` is not clamped.
pub fn integrate(shapes: &mut [Shape], dt: f32) {
    for shape in shapes.iter_mut() {
        shape.body_mut().integrate_step(dt);
    }
}
