//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PLANAR_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use planar_physics::{
    ElectricField, GravitationalField, Interactions, DEFAULT_BOUNDARY_RESTITUTION,
    DEFAULT_COULOMB_CONSTANT, DEFAULT_GRAVITATIONAL_CONSTANT, DEFAULT_RESTITUTION,
};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Viewport the simulation domain is fitted to
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Time stepping for the headless run
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Uniform fields applied every step
    #[serde(default)]
    pub fields: FieldsConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Scene to load at startup
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PLANAR_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // PLANAR_VIEWPORT__WIDTH=1920 -> viewport.width = 1920
        figment = figment.merge(Env::prefixed("PLANAR_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.simulation.timestep > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "simulation.timestep must be positive, got {}",
                self.simulation.timestep
            )));
        }
        if !(self.simulation.max_frame_dt >= self.simulation.timestep) {
            return Err(ConfigError::Invalid(format!(
                "simulation.max_frame_dt ({}) must be at least one timestep ({})",
                self.simulation.max_frame_dt, self.simulation.timestep
            )));
        }
        Ok(())
    }
}

/// Viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ViewportConfig {
    /// Width / height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Simulation timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed kernel timestep in seconds
    pub timestep: f32,
    /// Longest frame the driver will catch up on, in seconds
    pub max_frame_dt: f32,
    /// Fixed steps to run in headless mode
    pub steps: u32,
    /// Log body positions every this many steps (0 disables)
    pub report_interval: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_frame_dt: 0.25,
            steps: 600,
            report_interval: 60,
        }
    }
}

/// Uniform field configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub gravity: GravitationalField,
    pub electric: ElectricField,
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Coefficient of restitution between bodies
    pub restitution: f32,
    /// Velocity kept when bouncing off the viewport edge
    pub boundary_restitution: f32,
    /// Universal gravitational constant
    pub gravitational_constant: f32,
    /// Coulomb constant
    pub coulomb_constant: f32,
    /// Enabled step stages, e.g. `"COLLISIONS | BOUNDARY"`
    pub interactions: Interactions,
    /// Apply the electric field to polygons too
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
    /// Convert to the physics engine's config
    pub fn to_physics_config(&self) -> planar_physics::PhysicsConfig {
        planar_physics::PhysicsConfig {
            boundary_restitution: self.boundary_restitution,
            gravitational_constant: self.gravitational_constant,
            coulomb_constant: self.coulomb_constant,
            interactions: self.interactions,
            electric_field_on_polygons: self.electric_field_on_polygons,
            ..Default::default()
        }
        .with_restitution(self.restitution)
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RON scene file, relative to the working directory
    pub path: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scenes/default.ron"),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema
    Figment(Box<figment::Error>),
    /// Values parsed but cannot be simulated
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Figment(e) => write!(f, "Configuration error: {}", e),
            ConfigError::Invalid(message) => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Figment(e) => Some(e.as_ref()),
            ConfigError::Invalid(_) => None,
        }
    }
}
