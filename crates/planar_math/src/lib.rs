//! 2D Mathematics Library
//!
//! This crate provides the 2D vector type used by the planar physics kernel.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x and y components

mod vec2;

pub use vec2::Vec2;
