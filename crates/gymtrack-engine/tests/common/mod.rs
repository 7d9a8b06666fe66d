use chrono::NaiveDate;
use gymtrack_core::model::{Member, WorkoutSession};
use gymtrack_engine::GymEngine;
use tempfile::TempDir;

/// Engine over a fresh file-backed store; keep the `TempDir` alive
#[allow(dead_code)]
pub fn setup_engine() -> (TempDir, GymEngine) {
    let temp_dir = TempDir::new().unwrap();
    let engine = GymEngine::open(temp_dir.path().join("gym.db")).unwrap();
    (temp_dir, engine)
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub fn create_ann(engine: &mut GymEngine) -> Member {
    engine.create_member("Ann", "Lee", "ann@x.com").unwrap()
}

/// Log `count` sessions for `member_id`, one per day from 2024-01-01
#[allow(dead_code)]
pub fn log_sessions(engine: &mut GymEngine, member_id: i64, count: u32) -> Vec<WorkoutSession> {
    (0..count)
        .map(|i| {
            engine
                .create_workout_session(member_id, date(2024, 1, 1 + i), "running", 30)
                .unwrap()
        })
        .collect()
}

#[allow(dead_code)]
pub fn count_rows(engine: &GymEngine, table: &str) -> i64 {
    engine
        .database()
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}
