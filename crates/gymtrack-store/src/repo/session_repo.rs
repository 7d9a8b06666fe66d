//! SQL for the `workout_sessions` table

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::unit_of_work::UnitOfWork;
use gymtrack_core::model::{
    Member, SessionFilter, ValidSessionUpdate, ValidWorkoutSession, WorkoutSession,
    WorkoutSessionDetail,
};
use rusqlite::{OptionalExtension, Row};

const SESSION_COLUMNS: &str = "session_id, member_id, date, workout_type, duration_minutes";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<WorkoutSession> {
    Ok(WorkoutSession {
        session_id: row.get(0)?,
        member_id: row.get(1)?,
        date: row.get(2)?,
        workout_type: row.get(3)?,
        duration_minutes: row.get(4)?,
    })
}

/// Repository for workout sessions
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a validated session and return it with its generated id
    ///
    /// The caller checks that the member exists; the foreign key is the
    /// backstop and surfaces as `Integrity`.
    pub fn insert(uow: &UnitOfWork<'_>, session: &ValidWorkoutSession) -> Result<WorkoutSession> {
        uow.tx()
            .execute(
                "INSERT INTO workout_sessions (member_id, date, workout_type, duration_minutes)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    session.member_id(),
                    session.date(),
                    session.workout_type(),
                    session.duration_minutes(),
                ],
            )
            .map_err(from_rusqlite)?;

        let session_id = uow.tx().last_insert_rowid();
        Ok(session.clone().into_session(session_id))
    }

    /// Get a session by id
    pub fn get(uow: &UnitOfWork<'_>, session_id: i64) -> Result<Option<WorkoutSession>> {
        uow.tx()
            .query_row(
                &format!(
                    "SELECT {} FROM workout_sessions WHERE session_id = ?1",
                    SESSION_COLUMNS
                ),
                [session_id],
                session_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    /// Get a session joined with its owning member
    pub fn get_detail(
        uow: &UnitOfWork<'_>,
        session_id: i64,
    ) -> Result<Option<WorkoutSessionDetail>> {
        uow.tx()
            .query_row(
                "SELECT s.session_id, s.member_id, s.date, s.workout_type, s.duration_minutes,
                        m.first_name, m.last_name, m.email
                 FROM workout_sessions s
                 JOIN members m ON m.member_id = s.member_id
                 WHERE s.session_id = ?1",
                [session_id],
                |row| {
                    let session = session_from_row(row)?;
                    let member = Member {
                        member_id: session.member_id,
                        first_name: row.get(5)?,
                        last_name: row.get(6)?,
                        email: row.get(7)?,
                    };
                    Ok(WorkoutSessionDetail { session, member })
                },
            )
            .optional()
            .map_err(from_rusqlite)
    }

    /// All sessions, ordered by id
    pub fn list(uow: &UnitOfWork<'_>) -> Result<Vec<WorkoutSession>> {
        Self::find(uow, &SessionFilter::default())
    }

    /// Sessions owned by one member, in insertion order
    pub fn list_for_member(uow: &UnitOfWork<'_>, member_id: i64) -> Result<Vec<WorkoutSession>> {
        let mut stmt = uow
            .tx()
            .prepare(&format!(
                "SELECT {} FROM workout_sessions WHERE member_id = ?1 ORDER BY session_id",
                SESSION_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let sessions = stmt
            .query_map([member_id], session_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(sessions)
    }

    /// Sessions matching every supplied filter, ordered by id
    ///
    /// Date is an exact match. The type needle is a case-insensitive
    /// substring match (SQLite `lower()` folds ASCII only).
    pub fn find(uow: &UnitOfWork<'_>, filter: &SessionFilter) -> Result<Vec<WorkoutSession>> {
        let mut stmt = uow
            .tx()
            .prepare(&format!(
                "SELECT {} FROM workout_sessions
                 WHERE (?1 IS NULL OR date = ?1)
                   AND (?2 IS NULL OR instr(lower(workout_type), lower(?2)) > 0)
                 ORDER BY session_id",
                SESSION_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let sessions = stmt
            .query_map(
                rusqlite::params![filter.date, filter.type_needle()],
                session_from_row,
            )
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(sessions)
    }

    /// Overwrite the mutable fields of an existing session
    ///
    /// Only a validated update is accepted. Returns false if no such
    /// session existed.
    pub fn update(uow: &UnitOfWork<'_>, session: &ValidSessionUpdate) -> Result<bool> {
        let affected = uow
            .tx()
            .execute(
                "UPDATE workout_sessions
                 SET date = ?2, workout_type = ?3, duration_minutes = ?4
                 WHERE session_id = ?1",
                rusqlite::params![
                    session.session_id(),
                    session.date(),
                    session.workout_type(),
                    session.duration_minutes(),
                ],
            )
            .map_err(from_rusqlite)?;
        Ok(affected > 0)
    }

    /// Delete one session; returns false if it did not exist
    pub fn delete(uow: &UnitOfWork<'_>, session_id: i64) -> Result<bool> {
        let affected = uow
            .tx()
            .execute(
                "DELETE FROM workout_sessions WHERE session_id = ?1",
                [session_id],
            )
            .map_err(from_rusqlite)?;
        Ok(affected > 0)
    }
}
