//! Collision detection and impulse resolution
//!
//! Detection dispatches on both shapes' variants:
//! - Circle vs circle: center distance against the radius sum
//! - Polygon vs polygon: separating axis test over both polygons' edge normals
//! - Polygon vs circle: closest point on each polygon edge against the radius
//!
//! Resolution applies a single impulse along the line between the two
//! centers. Only circle pairs also get positional correction.

use crate::body::Body;
use crate::forces::DISTANCE_EPSILON;
use crate::pairs::for_each_pair_mut;
use crate::shapes::{Circle, RegularPolygon, Shape};
use planar_math::Vec2;

/// Default coefficient of restitution for body-body collisions
pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// Counts from one pass of [`resolve_collisions`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Pairs whose shapes overlapped
    pub contacts: usize,
    /// Pairs that received an impulse (approaching and at least one movable)
    pub impulses: usize,
}

/// Test circle vs circle overlap
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> bool {
    let radius_sum = a.radius() + b.radius();
    (b.center() - a.center()).length_squared() < radius_sum * radius_sum
}

/// Project vertices onto an axis, returning (min, max)
fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::MAX, f32::MIN), |(min, max), p| (min.min(p), max.max(p)))
}

/// Find an edge normal of `a` that separates `a` from `b`
///
/// Only `a`'s edges are tested, so `None` does not prove overlap on its own.
/// [`polygon_vs_polygon`] runs this in both directions.
pub fn separating_axis(a: &RegularPolygon, b: &RegularPolygon) -> Option<Vec2> {
    let vertices_a = a.vertices();
    let vertices_b = b.vertices();

    a.edges().into_iter().find_map(|(start, end)| {
        let axis = (end - start).perp().normalized();
        let (min_a, max_a) = project(&vertices_a, axis);
        let (min_b, max_b) = project(&vertices_b, axis);

        if max_a < min_b || max_b < min_a {
            Some(axis)
        } else {
            None
        }
    })
}

/// Test polygon vs polygon overlap with the separating axis theorem
pub fn polygon_vs_polygon(a: &RegularPolygon, b: &RegularPolygon) -> bool {
    separating_axis(a, b).is_none() && separating_axis(b, a).is_none()
}

/// Test polygon vs circle overlap
///
/// The circle collides if the closest point on any polygon edge lies within
/// its radius. A circle entirely inside the polygon, touching no edge, is
/// not reported.
pub fn polygon_vs_circle(polygon: &RegularPolygon, circle: &Circle) -> bool {
    let center = circle.center();
    let radius_sq = circle.radius() * circle.radius();

    polygon.edges().into_iter().any(|(start, end)| {
        let edge = end - start;
        let edge_length_sq = edge.length_squared();
        if edge_length_sq == 0.0 {
            return false;
        }

        let t = ((center - start).dot(edge) / edge_length_sq).clamp(0.0, 1.0);
        let closest = start + edge * t;
        (center - closest).length_squared() <= radius_sq
    })
}

/// Test two shapes for overlap
pub fn check_collision(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_vs_circle(a, b),
        (Shape::Polygon(a), Shape::Polygon(b)) => polygon_vs_polygon(a, b),
        (Shape::Polygon(polygon), Shape::Circle(circle)) => polygon_vs_circle(polygon, circle),
        (Shape::Circle(circle), Shape::Polygon(polygon)) => polygon_vs_circle(polygon, circle),
    }
}

/// Push two overlapping circles apart along `normal`
///
/// The overlap is split evenly between two movable circles, applied fully to
/// the only movable one, or left alone if neither can move.
fn separate_circles(a: &mut Circle, b: &mut Circle, normal: Vec2, distance: f32) {
    let overlap = a.radius() + b.radius() - distance;
    if overlap <= 0.0 {
        return;
    }

    match (a.body.is_movable(), b.body.is_movable()) {
        (true, true) => {
            let half = normal * (overlap * 0.5);
            a.body.set_position(a.body.position() - half);
            b.body.set_position(b.body.position() + half);
        }
        (true, false) => a.body.set_position(a.body.position() - normal * overlap),
        (false, true) => b.body.set_position(b.body.position() + normal * overlap),
        (false, false) => {}
    }
}

/// Effective mass of a pair, or `None` if neither body can move
fn effective_mass(a: &Body, b: &Body) -> Option<f32> {
    match (a.is_movable(), b.is_movable()) {
        (true, true) => Some(1.0 / (1.0 / a.mass() + 1.0 / b.mass())),
        (true, false) => Some(a.mass()),
        (false, true) => Some(b.mass()),
        (false, false) => None,
    }
}

/// Resolve a detected collision between two shapes
///
/// The contact normal points from `a`'s center to `b`'s. For circle pairs
/// this is the true separating direction; for pairs involving a polygon it
/// is an approximation. Returns true if an impulse was applied.
pub fn resolve_collision(a: &mut Shape, b: &mut Shape, restitution: f32) -> bool {
    let delta = b.position() - a.position();
    let distance = delta.length();
    if distance < DISTANCE_EPSILON {
        return false;
    }
    let normal = delta / distance;

    if let (Shape::Circle(ca), Shape::Circle(cb)) = (&mut *a, &mut *b) {
        separate_circles(ca, cb, normal, distance);
    }

    let (body_a, body_b) = (a.body_mut(), b.body_mut());

    let velocity_along_normal = (body_b.velocity() - body_a.velocity()).dot(normal);
    if velocity_along_normal >= 0.0 {
        return false;
    }

    let Some(mass) = effective_mass(body_a, body_b) else {
        return false;
    };

    let j = -(1.0 + restitution) * velocity_along_normal * mass;
    let impulse = normal * j;
    body_a.apply_impulse(-impulse);
    body_b.apply_impulse(impulse);
    true
}

/// Detect and resolve collisions over every unordered pair of shapes
///
/// Each pair is resolved immediately after it is detected, in index order.
pub fn resolve_collisions(shapes: &mut [Shape], restitution: f32) -> CollisionStats {
    let mut stats = CollisionStats::default();
    for_each_pair_mut(shapes, |a, b| {
        if check_collision(a, b) {
            stats.contacts += 1;
            if resolve_collision(a, b, restitution) {
                stats.impulses += 1;
            }
        }
    });
    stats
}
