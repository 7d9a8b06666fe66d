//! Engine handle owning the store

#![allow(clippy::result_large_err)]

use gymtrack_core::{log_op_end, log_op_error};
use gymtrack_store::{Database, Result};
use std::path::Path;
use std::time::Instant;

/// Entry point for every member and workout-session operation
///
/// Operations take `&mut self`: one runs at a time and none holds a unit
/// of work after it returns.
pub struct GymEngine {
    pub(crate) db: Database,
}

impl GymEngine {
    /// Open (creating if needed) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_database(Database::open(path)?))
    }

    /// Engine over a fresh in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Emit the terminal lifecycle event for `op` and pass the result through
pub(crate) fn finish<T>(op: &'static str, start: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }
    result
}
