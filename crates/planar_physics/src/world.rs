//! Physics world and simulation

use bitflags::bitflags;
use planar_math::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::body::BodyKey;
use crate::boundary::{contain_all, Bounds, DEFAULT_BOUNDARY_RESTITUTION};
use crate::collision::{resolve_collisions, DEFAULT_RESTITUTION};
use crate::field::{ElectricField, GravitationalField};
use crate::forces::{
    apply_pairwise_coulomb, apply_pairwise_gravitation, apply_uniform_fields,
    DEFAULT_COULOMB_CONSTANT, DEFAULT_GRAVITATIONAL_CONSTANT,
};
use crate::integrator::integrate;
use crate::shapes::Shape;

bitflags! {
    /// Stages of the simulation step that are enabled
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Interactions: u32 {
        /// Universal gravitation between every pair of bodies
        const PAIRWISE_GRAVITY = 1 << 0;
        /// Coulomb force between every pair of charged bodies
        const COULOMB = 1 << 1;
        /// Uniform gravitational field
        const UNIFORM_GRAVITY = 1 << 2;
        /// Uniform electric field
        const ELECTRIC_FIELD = 1 << 3;
        /// Body-body collision detection and resolution
        const COLLISIONS = 1 << 4;
        /// Viewport boundary containment
        const BOUNDARY = 1 << 5;
        /// Every stage
        const ALL = Self::PAIRWISE_GRAVITY.bits()
            | Self::COULOMB.bits()
            | Self::UNIFORM_GRAVITY.bits()
            | Self::ELECTRIC_FIELD.bits()
            | Self::COLLISIONS.bits()
            | Self::BOUNDARY.bits();
    }
}

impl Default for Interactions {
    fn default() -> Self {
        Interactions::ALL
    }
}

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Coefficient of restitution for body-body collisions
    pub restitution: f32,
    /// Fraction of velocity kept when bouncing off the boundary
    pub boundary_restitution: f32,
    /// G in `G * m1 * m2 / r^2`
    pub gravitational_constant: f32,
    /// K in `K * q1 * q2 / r^2`
    pub coulomb_constant: f32,
    /// Which step stages run
    pub interactions: Interactions,
    /// Let polygons feel the uniform electric field (circles always do)
    pub electric_field_on_polygons: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            restitution: DEFAULT_RESTITUTION,
            boundary_restitution: DEFAULT_BOUNDARY_RESTITUTION,
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            coulomb_constant: DEFAULT_COULOMB_CONSTANT,
            interactions: Interactions::ALL,
            electric_field_on_polygons: false,
        }
    }
}

impl PhysicsConfig {
    /// Set the body-body restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set the enabled stages
    pub fn with_interactions(mut self, interactions: Interactions) -> Self {
        self.interactions = interactions;
        self
    }
}

/// What happened during one [`PhysicsWorld::step`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Bodies that touched the boundary
    pub boundary_hits: usize,
    /// Overlapping pairs
    pub contacts: usize,
    /// Pairs that received an impulse
    pub impulses: usize,
}

/// The physics world containing all bodies
///
/// Bodies live densely in a `Vec` so the per-step pair loops index directly.
/// Callers hold generational [`BodyKey`]s; removal swaps the last body into
/// the freed slot and patches its key's index.
pub struct PhysicsWorld {
    /// Shapes in step order
    shapes: Vec<Shape>,
    /// Key of the shape at each index of `shapes`
    keys: Vec<BodyKey>,
    /// Key -> index into `shapes`
    indices: SlotMap<BodyKey, usize>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            shapes: Vec::new(),
            keys: Vec::new(),
            indices: SlotMap::with_key(),
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, shape: impl Into<Shape>) -> BodyKey {
        let shape = shape.into();
        let index = self.shapes.len();
        let key = self.indices.insert(index);
        log::debug!(
            "Added {:?} body at ({:.3}, {:.3})",
            shape.kind(),
            shape.position().x,
            shape.position().y
        );
        self.shapes.push(shape);
        self.keys.push(key);
        key
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Shape> {
        let index = self.indices.remove(key)?;
        let shape = self.shapes.swap_remove(index);
        self.keys.swap_remove(index);

        // The former last body now lives at `index`
        if let Some(&moved) = self.keys.get(index) {
            self.indices[moved] = index;
        }

        log::debug!("Removed {:?} body, {} remaining", shape.kind(), self.shapes.len());
        Some(shape)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Shape> {
        self.indices.get(key).map(|&index| &self.shapes[index])
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Shape> {
        let index = *self.indices.get(key)?;
        self.shapes.get_mut(index)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.shapes.len()
    }

    /// Iterate over all body keys in step order
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.keys.iter().copied()
    }

    /// Iterate over keys and shapes in step order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (BodyKey, &Shape)> + '_ {
        self.keys.iter().copied().zip(self.shapes.iter())
    }

    /// All shapes in step order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Remove every body
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.keys.clear();
        self.indices.clear();
    }

    /// Topmost body containing `point`, for drag interactions
    ///
    /// Bodies added later are considered on top.
    pub fn pick(&self, point: Vec2) -> Option<BodyKey> {
        self.iter()
            .rev()
            .find(|(_, shape)| shape.contains_point(point))
            .map(|(key, _)| key)
    }

    /// Outline vertices of every shape flattened to `[x0, y0, x1, y1, ...]`
    pub fn outline_buffer(&self) -> Vec<f32> {
        let points: Vec<Vec2> = self.shapes.iter().flat_map(|shape| shape.outline()).collect();
        bytemuck::cast_slice(&points).to_vec()
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs, in order:
    /// 1. Pairwise universal gravitation and Coulomb forces
    /// 2. Uniform gravitational and electric fields
    /// 3. Integration of every movable body (accumulators end at zero)
    /// 4. Boundary containment for the viewport `aspect` (width / height)
    /// 5. Body-body collision detection and resolution
    ///
    /// `dt` is used as given.
    pub fn step(
        &mut self,
        dt: f32,
        aspect: f32,
        gravity: &GravitationalField,
        electric: &ElectricField,
    ) -> StepReport {
        let config = &self.config;
        let interactions = config.interactions;
        let mut report = StepReport::default();

        // Phase 1: Pairwise forces
        if interactions.contains(Interactions::PAIRWISE_GRAVITY) {
            apply_pairwise_gravitation(&mut self.shapes, config.gravitational_constant);
        }
        if interactions.contains(Interactions::COULOMB) {
            apply_pairwise_coulomb(&mut self.shapes, config.coulomb_constant);
        }

        // Phase 2: Uniform fields
        let gravity = if interactions.contains(Interactions::UNIFORM_GRAVITY) {
            *gravity
        } else {
            GravitationalField::zero()
        };
        let electric = if interactions.contains(Interactions::ELECTRIC_FIELD) {
            *electric
        } else {
            ElectricField::default()
        };
        apply_uniform_fields(
            &mut self.shapes,
            &gravity,
            &electric,
            config.electric_field_on_polygons,
        );

        // Phase 3: Integrate
        integrate(&mut self.shapes, dt);

        // Phase 4: Boundary
        if interactions.contains(Interactions::BOUNDARY) {
            let bounds = Bounds::from_aspect(aspect);
            report.boundary_hits = contain_all(&mut self.shapes, &bounds, config.boundary_restitution);
        }

        // Phase 5: Collisions
        if interactions.contains(Interactions::COLLISIONS) {
            let stats = resolve_collisions(&mut self.shapes, config.restitution);
            report.contacts = stats.contacts;
            report.impulses = stats.impulses;
        }

        log::trace!(
            "Step dt={:.4}: {} boundary hits, {} contacts, {} impulses",
            dt,
            report.boundary_hits,
            report.contacts,
            report.impulses
        );
        report
    }

    /// Total kinetic energy of all bodies
    pub fn kinetic_energy(&self) -> f32 {
        self.shapes.iter().map(|s| s.body().kinetic_energy()).sum()
    }

    /// Total linear momentum of all bodies
    pub fn momentum(&self) -> Vec2 {
        self.shapes.iter().fold(Vec2::ZERO, |acc, s| acc + s.body().momentum())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
