//! gymtrack store - SQLite persistence for members and workout sessions
//!
//! Provides:
//! - Connection opening and configuration (foreign keys, WAL)
//! - Idempotent schema bootstrap with a recorded checksum
//! - The unit of work: one transaction per operation, committed on
//!   success and rolled back on every other exit path
//! - Row-level repositories for `members` and `workout_sessions`

pub mod db;
pub mod errors;
pub mod repo;
pub mod schema;
pub mod unit_of_work;

// Re-export key types
pub use db::Database;
pub use errors::Result;
pub use repo::{MemberRepo, SessionRepo};
pub use unit_of_work::UnitOfWork;
