use chrono::NaiveDate;
use gymtrack_core::model::{Member, WorkoutSession};

/// A stored member, as the store would hand it back
#[allow(dead_code)]
pub fn stored_member(member_id: i64, first: &str, last: &str, email: &str) -> Member {
    Member {
        member_id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
    }
}

/// A stored session on 2024-01-05
#[allow(dead_code)]
pub fn stored_session(session_id: i64, member_id: i64, workout_type: &str, minutes: i64) -> WorkoutSession {
    WorkoutSession {
        session_id,
        member_id,
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        workout_type: workout_type.to_string(),
        duration_minutes: minutes,
    }
}
