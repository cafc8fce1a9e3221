//! Viewport-shaped boundary containment
//!
//! The domain is the rectangle the viewport shows: the shorter axis spans
//! [-1, 1] and the longer one is stretched by the aspect ratio.

use crate::shapes::Shape;
use planar_math::Vec2;

/// Default fraction of velocity kept when bouncing off the boundary
pub const DEFAULT_BOUNDARY_RESTITUTION: f32 = 0.8;

/// Rectangular simulation domain centered on the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub half_extents: Vec2,
}

impl Bounds {
    /// Domain for a viewport with the given width / height ratio
    ///
    /// Wide viewports give `(aspect, 1)`, tall ones `(1, 1 / aspect)`.
    pub fn from_aspect(aspect: f32) -> Self {
        let half_extents = if aspect > 1.0 {
            Vec2::new(aspect, 1.0)
        } else {
            Vec2::new(1.0, 1.0 / aspect)
        };
        Self { half_extents }
    }

    /// Domain for a viewport size in pixels
    pub fn from_viewport(width: u32, height: u32) -> Self {
        Self::from_aspect(width as f32 / height.max(1) as f32)
    }
}

/// Reflect and clamp a single shape back inside the bounds
///
/// Returns true if the shape touched the boundary. Immovable shapes are left
/// untouched.
pub fn contain_shape(shape: &mut Shape, bounds: &Bounds, restitution: f32) -> bool {
    if !shape.body().is_movable() {
        return false;
    }

    let bb = shape.bounding_box();
    let limit = bounds.half_extents;
    let hit_x = bb.right() > limit.x || bb.left() < -limit.x;
    let hit_y = bb.top() > limit.y || bb.bottom() < -limit.y;

    let extent = shape.extent();
    let body = shape.body_mut();

    let mut velocity = body.velocity();
    if hit_x {
        velocity.x = -velocity.x * restitution;
    }
    if hit_y {
        velocity.y = -velocity.y * restitution;
    }
    body.set_velocity(velocity);

    // Not f32::clamp: the range inverts when the shape is wider than the domain
    let position = body.position();
    let clamped = Vec2::new(
        position.x.min(limit.x - extent).max(-limit.x + extent),
        position.y.min(limit.y - extent).max(-limit.y + extent),
    );
    body.set_position(clamped);

    hit_x || hit_y
}

/// Contain every movable shape, returning how many touched the boundary
pub fn contain_all(shapes: &mut [Shape], bounds: &Bounds, restitution: f32) -> usize {
    shapes
        .iter_mut()
        .map(|shape| contain_shape(shape, bounds, restitution))
        .filter(|&hit| hit)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    fn moving_circle(position: Vec2, velocity: Vec2, radius: f32) -> Shape {
        Shape::circle(Body::new(position, true).with_velocity(velocity), radius)
    }

    #[test]
    fn test_bounds_from_aspect() {
        assert_eq!(Bounds::from_aspect(1.6).half_extents, Vec2::new(1.6, 1.0));
        assert_eq!(Bounds::from_aspect(0.5).half_extents, Vec2::new(1.0, 2.0));
        assert_eq!(Bounds::from_aspect(1.0).half_extents, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_bounds_from_viewport() {
        let bounds = Bounds::from_viewport(1920, 1200);
        assert!((bounds.half_extents.x - 1.6).abs() < 0.0001);
        assert_eq!(bounds.half_extents.y, 1.0);
    }

    #[test]
    fn test_inside_shape_untouched() {
        let mut shape = moving_circle(Vec2::new(0.2, 0.3), Vec2::new(1.0, -1.0), 0.1);
        let hit = contain_shape(&mut shape, &Bounds::from_aspect(1.0), 0.8);

        assert!(!hit);
        assert_eq!(shape.position(), Vec2::new(0.2, 0.3));
        assert_eq!(shape.body().velocity(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_right_wall_reflects_and_clamps() {
        let mut shape = moving_circle(Vec2::new(1.05, 0.0), Vec2::new(1.0, 0.5), 0.1);
        let hit = contain_shape(&mut shape, &Bounds::from_aspect(1.0), 0.8);

        assert!(hit);
        let velocity = shape.body().velocity();
        assert!((velocity.x + 0.8).abs() < 0.0001);
        // Other axis untouched
        assert_eq!(velocity.y, 0.5);
        assert!(shape.position().x <= 0.9 + 0.0001);
    }

    #[test]
    fn test_floor_reflects_polygon() {
        let body = Body::new(Vec2::new(0.0, -0.95), true).with_velocity(Vec2::new(0.0, -2.0));
        let mut shape = Shape::polygon(body, 4, 0.2);
        let hit = contain_shape(&mut shape, &Bounds::from_aspect(1.0), 0.5);

        assert!(hit);
        assert!((shape.body().velocity().y - 1.0).abs() < 0.0001);
        assert!((shape.position().y + 0.8).abs() < 0.0001);
    }

    #[test]
    fn test_immovable_shape_untouched() {
        let body = Body::new(Vec2::new(5.0, 5.0), false).with_velocity(Vec2::new(1.0, 1.0));
        let mut shape = Shape::circle(body, 0.1);
        let hit = contain_shape(&mut shape, &Bounds::from_aspect(1.0), 0.8);

        assert!(!hit);
        assert_eq!(shape.position(), Vec2::new(5.0, 5.0));
        assert_eq!(shape.body().velocity(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_wide_viewport_allows_larger_x() {
        let mut shape = moving_circle(Vec2::new(1.4, 0.0), Vec2::new(1.0, 0.0), 0.1);
        let hit = contain_shape(&mut shape, &Bounds::from_aspect(1.6), 0.8);

        assert!(!hit);
        assert_eq!(shape.position().x, 1.4);
    }

    #[test]
    fn test_oversized_shape_does_not_panic() {
        let mut shape = moving_circle(Vec2::ZERO, Vec2::ZERO, 2.0);
        contain_all(std::slice::from_mut(&mut shape), &Bounds::from_aspect(1.0), 0.8);
        assert!(shape.position().is_finite());
    }

    #[test]
    fn test_contain_all_counts_hits() {
        let mut shapes = vec![
            moving_circle(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.1),
            moving_circle(Vec2::new(-1.2, 0.0), Vec2::new(-1.0, 0.0), 0.1),
            moving_circle(Vec2::new(0.0, 1.5), Vec2::new(0.0, 1.0), 0.1),
        ];
        let hits = contain_all(&mut shapes, &Bounds::from_aspect(1.0), 0.8);
        assert_eq!(hits, 2);
    }
}
