use gymtrack_core::model::NewWorkoutSession;
use gymtrack_core::rules::title_case;
use proptest::prelude::*;

proptest! {
    /// Property: title casing is idempotent
    #[test]
    fn prop_title_case_idempotent(value in "[a-zA-Z' -]{0,30}") {
        let once = title_case(&value);
        prop_assert_eq!(title_case(&once), once);
    }

    /// Property: a valid workout type is stored trimmed and title-cased
    #[test]
    fn prop_workout_type_normalized(kind in "[a-zA-Z]{1,10}( [a-zA-Z]{1,10})?", pad in " {0,3}") {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let raw = format!("{}{}{}", pad, kind, pad);
        let valid = NewWorkoutSession::new(1, date, raw, 30).validate().unwrap();
        prop_assert_eq!(valid.workout_type(), title_case(&kind));
    }

    /// Property: durations are accepted exactly when positive
    #[test]
    fn prop_duration_sign_decides(minutes in any::<i64>()) {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let result = NewWorkoutSession::new(1, date, "yoga", minutes).validate();
        prop_assert_eq!(result.is_ok(), minutes > 0);
    }
}
