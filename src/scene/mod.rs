//! Scene serialization
//!
//! Provides the [`Scene`] struct for loading/saving body layouts from RON
//! files and instantiating them into a [`PhysicsWorld`].

mod validator;

pub use validator::{SceneValidator, ValidationError};

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use planar_math::Vec2;
use planar_physics::{Body, BodyKey, Circle, PhysicsWorld, Shape, DEFAULT_CIRCLE_SEGMENTS};

/// A serializable scene containing body templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Bodies in insertion order
    pub bodies: Vec<BodyTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
        }
    }

    /// Two resting circles, one diagonally offset from the other
    pub fn default_scene() -> Self {
        let mut scene = Scene::new("Default");
        scene.add_body(BodyTemplate::circle(Vec2::new(0.0, 0.0), 0.1).with_mass(2.0));
        scene.add_body(BodyTemplate::circle(Vec2::new(1.1, 1.0), 0.1).with_mass(2.0));
        scene
    }

    /// Load and validate a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene: Scene = ron::from_str(&contents)?;
        SceneValidator::validate_or_error(&scene).map_err(SceneLoadError::Invalid)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a body template to this scene
    pub fn add_body(&mut self, body: BodyTemplate) {
        self.bodies.push(body);
    }

    /// Add every body to `world`, returning their keys in scene order
    ///
    /// The scene should have passed [`SceneValidator`] first; unchecked
    /// templates can create bodies the kernel does not expect.
    pub fn instantiate(&self, world: &mut PhysicsWorld) -> Vec<BodyKey> {
        log::info!("Instantiating scene '{}' with {} bodies", self.name, self.bodies.len());
        self.bodies
            .iter()
            .map(|template| world.add_body(template.to_shape()))
            .collect()
    }
}

/// Shape parameters of a body template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeTemplate {
    Circle {
        radius: f32,
        #[serde(default = "default_segments")]
        segments: u32,
    },
    Polygon {
        vertices: u32,
        circumradius: f32,
    },
}

fn default_segments() -> u32 {
    DEFAULT_CIRCLE_SEGMENTS
}

/// A body as stored in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    /// Optional label for logging and validation messages
    #[serde(default)]
    pub name: Option<String>,
    pub shape: ShapeTemplate,
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default)]
    pub charge: f32,
    #[serde(default = "default_movable")]
    pub movable: bool,
}

fn default_mass() -> f32 {
    1.0
}

fn default_movable() -> bool {
    true
}

impl BodyTemplate {
    /// A movable, uncharged, unit-mass body
    pub fn new(shape: ShapeTemplate, position: Vec2) -> Self {
        Self {
            name: None,
            shape,
            position,
            velocity: Vec2::ZERO,
            mass: default_mass(),
            charge: 0.0,
            movable: true,
        }
    }

    pub fn circle(position: Vec2, radius: f32) -> Self {
        Self::new(
            ShapeTemplate::Circle {
                radius,
                segments: DEFAULT_CIRCLE_SEGMENTS,
            },
            position,
        )
    }

    pub fn polygon(position: Vec2, vertices: u32, circumradius: f32) -> Self {
        Self::new(ShapeTemplate::Polygon { vertices, circumradius }, position)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_charge(mut self, charge: f32) -> Self {
        self.charge = charge;
        self
    }

    pub fn immovable(mut self) -> Self {
        self.movable = false;
        self
    }

    /// Build the runtime shape
    pub fn to_shape(&self) -> Shape {
        let body = Body::new(self.position, self.movable)
            .with_velocity(self.velocity)
            .with_mass(self.mass)
            .with_charge(self.charge);

        match self.shape {
            ShapeTemplate::Circle { radius, segments } => {
                Circle::with_segments(body, radius, segments).into()
            }
            ShapeTemplate::Polygon { vertices, circumradius } => {
                Shape::polygon(body, vertices, circumradius)
            }
        }
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// The file parsed but describes bodies that cannot be simulated
    Invalid(Vec<ValidationError>),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::Invalid(errors) => {
                write!(f, "Invalid scene:")?;
                for error in errors {
                    write!(f, " {};", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
