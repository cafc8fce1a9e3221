//! Simulation system
//!
//! Converts wall-clock frame time into fixed physics steps:
//! - Delta time calculation
//! - Frame time capping
//! - Fixed-timestep accumulation

use std::time::Instant;

use planar_physics::{ElectricField, GravitationalField, PhysicsWorld, StepReport};

use crate::config::AppConfig;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationResult {
    /// Fixed steps taken this frame
    pub steps: u32,
    /// Boundary hits, contacts and impulses summed over those steps
    pub report: StepReport,
}

impl SimulationResult {
    fn accumulate(&mut self, report: StepReport) {
        self.steps += 1;
        self.report.boundary_hits += report.boundary_hits;
        self.report.contacts += report.contacts;
        self.report.impulses += report.impulses;
    }
}

/// Drives a [`PhysicsWorld`] at a fixed timestep
///
/// The world itself takes whatever `dt` it is given. This system caps the
/// frame time at `max_frame_dt` and slices it into `timestep`-sized steps,
/// carrying the remainder to the next frame.
pub struct SimulationSystem {
    timestep: f32,
    max_frame_dt: f32,
    accumulator: f32,
    last_frame: Instant,
    /// Viewport width / height
    pub aspect: f32,
    pub gravity: GravitationalField,
    pub electric: ElectricField,
}

impl SimulationSystem {
    /// Create a new simulation system with default fields
    pub fn new(timestep: f32, max_frame_dt: f32, aspect: f32) -> Self {
        debug_assert!(timestep > 0.0, "Timestep must be positive");
        Self {
            timestep,
            max_frame_dt,
            accumulator: 0.0,
            last_frame: Instant::now(),
            aspect,
            gravity: GravitationalField::default(),
            electric: ElectricField::default(),
        }
    }

    /// Create a simulation system from application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let mut system = Self::new(
            config.simulation.timestep,
            config.simulation.max_frame_dt,
            config.viewport.aspect(),
        );
        system.gravity = config.fields.gravity;
        system.electric = config.fields.electric;
        system
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.timestep
    }

    /// Run exactly one fixed step
    pub fn step_once(&self, world: &mut PhysicsWorld) -> StepReport {
        world.step(self.timestep, self.aspect, &self.gravity, &self.electric)
    }

    /// Consume `frame_dt` seconds of simulated time
    pub fn advance(&mut self, world: &mut PhysicsWorld, frame_dt: f32) -> SimulationResult {
        // Cap dt to prevent spiral of death after a stall
        let frame_dt = frame_dt.max(0.0).min(self.max_frame_dt);
        self.accumulator += frame_dt;

        let mut result = SimulationResult::default();
        while self.accumulator >= self.timestep {
            result.accumulate(self.step_once(world));
            self.accumulator -= self.timestep;
        }

        if result.report.impulses > 0 {
            log::debug!(
                "Frame: {} steps, {} contacts, {} impulses",
                result.steps,
                result.report.contacts,
                result.report.impulses
            );
        }
        result
    }

    /// Run one frame using the wall-clock time since the previous call
    pub fn update(&mut self, world: &mut PhysicsWorld) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(world, raw_dt)
    }
}
