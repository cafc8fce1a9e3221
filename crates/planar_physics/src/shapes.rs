//! Shape variants and their geometry
//!
//! Every variant owns a [`Body`] and adds a geometric extent. Geometry is
//! always derived from the body's current position, so there is nothing to
//! keep in sync when the body moves.

use std::f32::consts::PI;

use crate::body::Body;
use planar_math::Vec2;

/// Default tessellation for circle outlines
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 100;

/// A 2D axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner (left, bottom)
    pub min: Vec2,
    /// Maximum corner (right, top)
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a new AABB spanning two opposite corners, in either order
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min_components(b),
            max: a.max_components(b),
        }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// A circle of fixed radius centered on its body
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub body: Body,
    radius: f32,
    /// Outline tessellation, only meaningful to renderers
    segments: u32,
}

impl Circle {
    /// Create a circle with the default outline tessellation
    pub fn new(body: Body, radius: f32) -> Self {
        Self::with_segments(body, radius, DEFAULT_CIRCLE_SEGMENTS)
    }

    pub fn with_segments(body: Body, radius: f32, segments: u32) -> Self {
        debug_assert!(radius > 0.0, "circle radius must be positive, got {}", radius);
        Self {
            body,
            radius,
            segments,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.position()
    }

    pub fn bounding_box(&self) -> Aabb2 {
        Aabb2::from_center_half_extents(self.center(), Vec2::new(self.radius, self.radius))
    }

    /// Check if a point is inside or on the circle
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center()).length_squared() <= self.radius * self.radius
    }

    /// Outline points, one per segment, counter-clockwise from +x
    pub fn outline(&self) -> Vec<Vec2> {
        let center = self.center();
        (0..self.segments)
            .map(|i| {
                let angle = 2.0 * PI * i as f32 / self.segments as f32;
                center + Vec2::from_angle(angle) * self.radius
            })
            .collect()
    }
}

/// A regular polygon centered on its body
///
/// There is no rotation state: vertex `i` always sits at angle
/// `2π·i / vertex_count` on the circumscribed circle.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularPolygon {
    pub body: Body,
    vertex_count: u32,
    circumradius: f32,
}

impl RegularPolygon {
    pub fn new(body: Body, vertex_count: u32, circumradius: f32) -> Self {
        debug_assert!(vertex_count >= 3, "polygon needs at least 3 vertices, got {}", vertex_count);
        debug_assert!(circumradius > 0.0, "polygon circumradius must be positive, got {}", circumradius);
        Self {
            body,
            vertex_count,
            circumradius,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn circumradius(&self) -> f32 {
        self.circumradius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.position()
    }

    /// World-space vertices in counter-clockwise order
    pub fn vertices(&self) -> Vec<Vec2> {
        let center = self.center();
        (0..self.vertex_count)
            .map(|i| {
                let angle = 2.0 * PI * i as f32 / self.vertex_count as f32;
                center + Vec2::from_angle(angle) * self.circumradius
            })
            .collect()
    }

    /// Edges as (start, end) vertex pairs, wrapping back to the first vertex
    pub fn edges(&self) -> Vec<(Vec2, Vec2)> {
        let vertices = self.vertices();
        let n = vertices.len();
        (0..n).map(|i| (vertices[i], vertices[(i + 1) % n])).collect()
    }

    /// Bounding box from the circumradius
    ///
    /// This overestimates the true footprint for most vertex counts.
    pub fn bounding_box(&self) -> Aabb2 {
        Aabb2::from_center_half_extents(self.center(), Vec2::new(self.circumradius, self.circumradius))
    }

    /// Check if a point is inside or on the polygon
    pub fn contains(&self, point: Vec2) -> bool {
        // Counter-clockwise winding: inside points are left of every edge
        self.edges().iter().all(|&(start, end)| {
            let edge = end - start;
            edge.perp().dot(point - start) >= 0.0
        })
    }
}

/// Which variant a [`Shape`] is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

/// A body together with its geometry
///
/// The shape set is closed; collision code dispatches on pairs of variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(RegularPolygon),
}

impl Shape {
    /// Convenience constructor for a circle shape
    pub fn circle(body: Body, radius: f32) -> Self {
        Shape::Circle(Circle::new(body, radius))
    }

    /// Convenience constructor for a regular polygon shape
    pub fn polygon(body: Body, vertex_count: u32, circumradius: f32) -> Self {
        Shape::Polygon(RegularPolygon::new(body, vertex_count, circumradius))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Shape::Circle(c) => &c.body,
            Shape::Polygon(p) => &p.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Shape::Circle(c) => &mut c.body,
            Shape::Polygon(p) => &mut p.body,
        }
    }

    /// Center of mass
    pub fn position(&self) -> Vec2 {
        self.body().position()
    }

    /// Radius for circles, circumradius for polygons
    pub fn extent(&self) -> f32 {
        match self {
            Shape::Circle(c) => c.radius(),
            Shape::Polygon(p) => p.circumradius(),
        }
    }

    pub fn bounding_box(&self) -> Aabb2 {
        match self {
            Shape::Circle(c) => c.bounding_box(),
            Shape::Polygon(p) => p.bounding_box(),
        }
    }

    /// Hit test used by drag interactions
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Shape::Circle(c) => c.contains(point),
            Shape::Polygon(p) => p.contains(point),
        }
    }

    /// Outline points for renderers
    pub fn outline(&self) -> Vec<Vec2> {
        match self {
            Shape::Circle(c) => c.outline(),
            Shape::Polygon(p) => p.vertices(),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            Shape::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&RegularPolygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            Shape::Circle(_) => None,
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<RegularPolygon> for Shape {
    fn from(polygon: RegularPolygon) -> Self {
        Shape::Polygon(polygon)
    }
}
