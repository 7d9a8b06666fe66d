//! gymtrack core - entity definitions, validation and shared facilities
//!
//! This crate has no storage dependency. It provides:
//! - Member and WorkoutSession models with derived properties
//! - Explicit validation producing either a validated record or an
//!   itemized error
//! - The canonical error facility (`ExError`, `ExErrorKind`, `GymError`)
//! - The structured logging facility and its macros

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Macros expand to paths under this re-export.
pub use gymtrack_core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, FieldViolation, GymError, Result};
pub use model::{
    Member, NewMember, NewWorkoutSession, SessionFilter, WorkoutSession, WorkoutSessionDetail,
    WorkoutSessionPatch,
};
