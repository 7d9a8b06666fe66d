//! Database connection management
//!
//! Opens and configures the SQLite store and hands out units of work

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, Result};
use crate::schema::ensure_schema;
use crate::unit_of_work::UnitOfWork;
use gymtrack_core::errors::ExError;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The local gym store
///
/// Owns one SQLite connection. Every operation borrows it mutably through
/// [`Database::acquire`] or [`Database::run`], so units of work cannot nest
/// or overlap.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (creating if needed) a store at the given path
    ///
    /// Creates missing parent directories, enables foreign keys and WAL,
    /// and bootstraps the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_dir", e))?;
        }

        let mut conn = Connection::open(path).map_err(from_rusqlite)?;
        configure(&conn, true)?;
        ensure_schema(&mut conn)?;

        tracing::debug!(path = %path.display(), "database opened");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        configure(&conn, false)?;
        ensure_schema(&mut conn)?;
        Ok(Self { conn, path: None })
    }

    /// Backing file, or `None` for an in-memory store
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Begin a unit of work
    ///
    /// The returned handle rolls back when dropped unless
    /// [`UnitOfWork::commit`] was called.
    pub fn acquire(&mut self) -> Result<UnitOfWork<'_>> {
        UnitOfWork::begin(&mut self.conn)
    }

    /// Run `work` inside one unit of work
    ///
    /// Commits when `work` returns `Ok`. On `Err` the unit of work is
    /// rolled back and the error returned unchanged apart from `op`
    /// context. A failed commit is rolled back and surfaces as the mapped
    /// store error (`Integrity` for constraint failures).
    pub fn run<T, F>(&mut self, op: &'static str, work: F) -> Result<T>
    where
        F: FnOnce(&UnitOfWork<'_>) -> Result<T>,
    {
        let started = Instant::now();
        let uow = self.acquire().map_err(|e| e.or_op(op))?;

        match work(&uow) {
            Ok(value) => {
                uow.commit().map_err(|e| e.or_op(op))?;
                tracing::debug!(
                    op,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "unit of work committed"
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback() {
                    // Dropping the transaction retries the rollback.
                    tracing::warn!(op, error = %rollback_err, "explicit rollback failed");
                }
                tracing::debug!(op, code = err.code(), "unit of work rolled back");
                Err(err.or_op(op))
            }
        }
    }

    /// Raw connection, for diagnostics and tests
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Configure a connection with the settings every store relies on
fn configure(conn: &Connection, file_backed: bool) -> Result<()> {
    // Cascade deletes depend on this; it is off by default in SQLite.
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;

    if file_backed {
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(from_rusqlite)?;
    }

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .map_err(from_rusqlite)?;
    if enabled != 1 {
        return Err(ExError::from(gymtrack_core::GymError::Internal {
            message: "SQLite build does not enforce foreign keys".to_string(),
        }));
    }

    Ok(())
}
