//! Application systems
//!
//! Systems that sit between the binary and the physics kernel.

mod simulation;

pub use simulation::{SimulationResult, SimulationSystem};
