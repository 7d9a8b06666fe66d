use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::member::Member;
use crate::errors::{GymError, Result};
use crate::rules::validation::{normalize_workout_type, validate_duration, Violations};

/// WorkoutSession - one logged workout, owned by exactly one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Store-generated identifier
    pub session_id: i64,

    /// Owning member; never reassigned
    pub member_id: i64,

    pub date: NaiveDate,

    /// Trimmed, title-cased workout type (e.g. "Cycling")
    pub workout_type: String,

    /// Strictly positive
    pub duration_minutes: i64,
}

impl std::fmt::Display for WorkoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session ID: {} | Member ID: {} | Date: {} | Type: {} | Duration: {} min",
            self.session_id, self.member_id, self.date, self.workout_type, self.duration_minutes
        )
    }
}

/// Request to log a workout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkoutSession {
    pub member_id: i64,
    pub date: NaiveDate,
    pub workout_type: String,
    pub duration_minutes: i64,
}

impl NewWorkoutSession {
    pub fn new(
        member_id: i64,
        date: NaiveDate,
        workout_type: impl Into<String>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            member_id,
            date,
            workout_type: workout_type.into(),
            duration_minutes,
        }
    }

    /// Validate and normalize the request
    ///
    /// # Errors
    /// `Validation` listing every failing field.
    pub fn validate(&self) -> Result<ValidWorkoutSession> {
        let mut violations = Violations::default();
        let workout_type = violations
            .check(normalize_workout_type(&self.workout_type))
            .unwrap_or_default();
        let duration_minutes = violations
            .check(validate_duration(self.duration_minutes))
            .unwrap_or_default();

        violations
            .into_result()
            .map_err(|violations| GymError::InvalidWorkoutSession { violations })?;

        Ok(ValidWorkoutSession {
            member_id: self.member_id,
            date: self.date,
            workout_type,
            duration_minutes,
        })
    }
}

/// A session request that passed validation, with `workout_type` already
/// normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidWorkoutSession {
    member_id: i64,
    date: NaiveDate,
    workout_type: String,
    duration_minutes: i64,
}

impl ValidWorkoutSession {
    pub fn member_id(&self) -> i64 {
        self.member_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn workout_type(&self) -> &str {
        &self.workout_type
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Attach the store-generated id
    pub fn into_session(self, session_id: i64) -> WorkoutSession {
        WorkoutSession {
            session_id,
            member_id: self.member_id,
            date: self.date,
            workout_type: self.workout_type,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Partial update: `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutSessionPatch {
    pub date: Option<NaiveDate>,
    pub workout_type: Option<String>,
    pub duration_minutes: Option<i64>,
}

impl WorkoutSessionPatch {
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_workout_type(mut self, workout_type: impl Into<String>) -> Self {
        self.workout_type = Some(workout_type.into());
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.workout_type.is_none() && self.duration_minutes.is_none()
    }

    /// Validate every supplied field
    ///
    /// # Errors
    /// `Validation` if any supplied field is invalid; in that case none of
    /// the fields may be applied.
    pub fn validate(&self) -> Result<ValidPatch> {
        let mut violations = Violations::default();
        let workout_type = self
            .workout_type
            .as_deref()
            .and_then(|t| violations.check(normalize_workout_type(t)));
        let duration_minutes = self
            .duration_minutes
            .and_then(|d| violations.check(validate_duration(d)));

        violations
            .into_result()
            .map_err(|violations| GymError::InvalidWorkoutSession { violations })?;

        Ok(ValidPatch {
            date: self.date,
            workout_type,
            duration_minutes,
        })
    }
}

/// A validated patch, ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPatch {
    date: Option<NaiveDate>,
    workout_type: Option<String>,
    duration_minutes: Option<i64>,
}

impl ValidPatch {
    /// Merge the patch over `current` and validate the merged record
    ///
    /// Unsupplied fields keep their stored value but are checked again, so
    /// a row written by an older release cannot carry an invalid type or
    /// duration back into the store.
    ///
    /// # Errors
    /// `Validation` if the merged record breaks a field rule.
    pub fn apply_to(&self, current: &WorkoutSession) -> Result<ValidSessionUpdate> {
        let merged = NewWorkoutSession::new(
            current.member_id,
            self.date.unwrap_or(current.date),
            self.workout_type
                .clone()
                .unwrap_or_else(|| current.workout_type.clone()),
            self.duration_minutes.unwrap_or(current.duration_minutes),
        );
        Ok(ValidSessionUpdate {
            session_id: current.session_id,
            fields: merged.validate()?,
        })
    }
}

/// A stored session with every field validated; the only input the store
/// accepts for an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSessionUpdate {
    session_id: i64,
    fields: ValidWorkoutSession,
}

impl ValidSessionUpdate {
    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn date(&self) -> NaiveDate {
        self.fields.date()
    }

    pub fn workout_type(&self) -> &str {
        self.fields.workout_type()
    }

    pub fn duration_minutes(&self) -> i64 {
        self.fields.duration_minutes()
    }

    /// The record as it reads after the update
    pub fn into_session(self) -> WorkoutSession {
        self.fields.into_session(self.session_id)
    }
}

/// A session together with its owning member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSessionDetail {
    pub session: WorkoutSession,
    pub member: Member,
}

/// A member together with every session it owns, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSessions {
    pub member: Member,
    pub sessions: Vec<WorkoutSession>,
}

/// Search criteria for sessions; both filters are optional and combine with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Exact date match
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the workout type
    pub workout_type: Option<String>,
}

impl SessionFilter {
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_type(mut self, needle: impl Into<String>) -> Self {
        self.workout_type = Some(needle.into());
        self
    }

    /// The type needle to search for; blank needles are ignored
    pub fn type_needle(&self) -> Option<&str> {
        self.workout_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
