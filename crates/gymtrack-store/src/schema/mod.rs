//! Schema bootstrap
//!
//! Creates the `members` and `workout_sessions` tables when absent and
//! records which DDL created them. There is no migration runner: a store
//! whose recorded checksum differs from the embedded DDL is refused.

#![allow(clippy::result_large_err)]

mod checksum;

use crate::errors::{from_rusqlite, schema_error, Result};
use checksum::compute_checksum;
use rusqlite::{Connection, OptionalExtension};

/// Embedded DDL for the current schema
pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Version recorded in `schema_info`
pub const SCHEMA_VERSION: i64 = 1;

/// Create tables if they do not exist and verify the recorded checksum
///
/// Idempotent. Runs in its own transaction.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let checksum = compute_checksum(SCHEMA_SQL);
    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_info (
            version INTEGER PRIMARY KEY,
            checksum TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    let recorded: Option<String> = tx
        .query_row(
            "SELECT checksum FROM schema_info WHERE version = ?1",
            [SCHEMA_VERSION],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    match recorded {
        Some(existing) if existing == checksum => {
            tracing::debug!(version = SCHEMA_VERSION, "schema already present");
        }
        Some(existing) => {
            return Err(schema_error(&format!(
                "schema mismatch for version {}: store has {}, expected {}",
                SCHEMA_VERSION, existing, checksum
            )));
        }
        None => {
            tx.execute_batch(SCHEMA_SQL).map_err(from_rusqlite)?;
            tx.execute(
                "INSERT INTO schema_info (version, checksum, applied_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![SCHEMA_VERSION, checksum, chrono::Utc::now().to_rfc3339()],
            )
            .map_err(from_rusqlite)?;
            tracing::info!(version = SCHEMA_VERSION, "schema created");
        }
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(())
}
