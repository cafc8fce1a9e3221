//! Planar - 2D particle physics sandbox
//!
//! Configuration, scene files and the fixed-timestep driver around the
//! `planar_physics` kernel.

pub mod config;
pub mod scene;
pub mod systems;
