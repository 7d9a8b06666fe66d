//! Error handling for gymtrack-store
//!
//! Wraps gymtrack-core ExError with store-specific helpers

use gymtrack_core::errors::{ExError, ExErrorKind};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
///
/// Constraint violations (UNIQUE, FOREIGN KEY, NOT NULL, CHECK) become
/// `Integrity`; everything else is `Storage`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = if is_constraint_violation(&err) {
        ExErrorKind::Integrity
    } else {
        ExErrorKind::Storage
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// True if SQLite rejected the statement because of a constraint
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// True if the failure is a UNIQUE violation on `table.column`
pub fn is_unique_violation(err: &rusqlite::Error, table_column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) if e.code == ErrorCode::ConstraintViolation => {
            msg.starts_with("UNIQUE constraint failed") && msg.contains(table_column)
        }
        _ => false,
    }
}

/// Create a schema bootstrap error
pub fn schema_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::Storage)
        .with_op("schema")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn unique_failure() -> rusqlite::Error {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (email TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err()
    }

    #[test]
    fn test_unique_violation_maps_to_integrity() {
        let err = unique_failure();
        assert!(is_unique_violation(&err, "t.email"));
        assert!(!is_unique_violation(&err, "members.email"));
        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::Integrity);
    }

    #[test]
    fn test_other_failures_map_to_storage() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing_table", []).unwrap_err();
        assert!(!is_constraint_violation(&err));
        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::Storage);
    }

    #[test]
    fn test_io_error_kind() {
        let err = io_error(
            "create_dir",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("create_dir"));
    }
}
