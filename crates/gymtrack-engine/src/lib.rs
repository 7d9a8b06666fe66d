//! gymtrack engine - the operation set consumed by presentation layers
//!
//! Each operation validates its input, runs inside exactly one unit of
//! work, and owns the lifecycle log events for that operation.

pub mod commands;
pub mod engine;

pub use engine::GymEngine;
