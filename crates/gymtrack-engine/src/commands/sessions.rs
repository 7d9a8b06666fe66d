//! Workout session operations.

#![allow(clippy::result_large_err)]

use crate::engine::{finish, GymEngine};
use chrono::NaiveDate;
use gymtrack_core::errors::GymError;
use gymtrack_core::log_op_start;
use gymtrack_core::model::{
    NewWorkoutSession, SessionFilter, WorkoutSession, WorkoutSessionDetail, WorkoutSessionPatch,
};
use gymtrack_store::{MemberRepo, Result, SessionRepo};
use std::time::Instant;

impl GymEngine {
    /// Log a workout session for an existing member
    ///
    /// ## Errors
    ///
    /// - `Validation`: blank or over-long type, or duration not positive.
    ///   Checked first, so an invalid request for a missing member is still
    ///   a validation failure
    /// - `NotFound`: the member does not exist
    pub fn create_workout_session(
        &mut self,
        member_id: i64,
        date: NaiveDate,
        workout_type: &str,
        duration_minutes: i64,
    ) -> Result<WorkoutSession> {
        const OP: &str = "create_workout_session";
        log_op_start!(OP, member_id = member_id);
        let start = Instant::now();

        let result = NewWorkoutSession::new(member_id, date, workout_type, duration_minutes)
            .validate()
            .and_then(|valid| {
                self.db.run(OP, |uow| {
                    if !MemberRepo::exists(uow, member_id)? {
                        return Err(GymError::MemberNotFound { member_id }.into());
                    }
                    SessionRepo::insert(uow, &valid)
                })
            });

        if let Ok(session) = &result {
            tracing::debug!(session_id = session.session_id, "workout session created");
        }
        finish(OP, start, result)
    }

    /// Delete one session; the owning member is untouched
    ///
    /// Returns the deleted session.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no session with that id
    pub fn delete_workout_session(&mut self, session_id: i64) -> Result<WorkoutSession> {
        const OP: &str = "delete_workout_session";
        log_op_start!(OP, session_id = session_id);
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            let session = SessionRepo::get(uow, session_id)?
                .ok_or(GymError::WorkoutSessionNotFound { session_id })?;
            SessionRepo::delete(uow, session_id)?;
            Ok(session)
        });

        finish(OP, start, result)
    }

    /// All sessions, ordered by id
    pub fn list_workout_sessions(&mut self) -> Result<Vec<WorkoutSession>> {
        const OP: &str = "list_workout_sessions";
        log_op_start!(OP);
        let start = Instant::now();

        let result = self.db.run(OP, SessionRepo::list);
        finish(OP, start, result)
    }

    /// A session together with its owning member
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no session with that id
    pub fn get_workout_session_detail(&mut self, session_id: i64) -> Result<WorkoutSessionDetail> {
        const OP: &str = "get_workout_session_detail";
        log_op_start!(OP, session_id = session_id);
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            Ok(SessionRepo::get_detail(uow, session_id)?
                .ok_or(GymError::WorkoutSessionNotFound { session_id })?)
        });

        finish(OP, start, result)
    }

    /// Sessions matching every supplied filter
    ///
    /// With no filters this is the same as [`GymEngine::list_workout_sessions`].
    /// No match is an empty list, not an error.
    pub fn find_workout_sessions(&mut self, filter: &SessionFilter) -> Result<Vec<WorkoutSession>> {
        const OP: &str = "find_workout_sessions";
        log_op_start!(
            OP,
            date = ?filter.date,
            workout_type = ?filter.type_needle()
        );
        let start = Instant::now();

        let result = self.db.run(OP, |uow| SessionRepo::find(uow, filter));
        if let Ok(sessions) = &result {
            tracing::debug!(row_count = sessions.len(), "workout sessions found");
        }
        finish(OP, start, result)
    }

    /// Apply a partial update to a session
    ///
    /// Every supplied field is validated before anything is written; if
    /// any fails, none is applied. An empty patch returns the session as
    /// stored.
    ///
    /// ## Errors
    ///
    /// - `Validation`: a supplied field is invalid
    /// - `NotFound`: no session with that id
    pub fn update_workout_session(
        &mut self,
        session_id: i64,
        patch: &WorkoutSessionPatch,
    ) -> Result<WorkoutSession> {
        const OP: &str = "update_workout_session";
        log_op_start!(OP, session_id = session_id);
        let start = Instant::now();

        let result = patch.validate().and_then(|valid| {
            self.db.run(OP, |uow| {
                let current = SessionRepo::get(uow, session_id)?
                    .ok_or(GymError::WorkoutSessionNotFound { session_id })?;
                if patch.is_empty() {
                    return Ok(current);
                }

                let update = valid.apply_to(&current)?;
                if !SessionRepo::update(uow, &update)? {
                    return Err(GymError::WorkoutSessionNotFound { session_id }.into());
                }
                Ok(update.into_session())
            })
        });

        finish(OP, start, result)
    }
}
