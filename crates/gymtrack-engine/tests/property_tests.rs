// Property tests over the engine: naming, cascade, duration and search
// behaviour hold for arbitrary inputs.

mod common;

use common::date;
use gymtrack_core::model::SessionFilter;
use gymtrack_engine::GymEngine;
use proptest::prelude::*;

/// "mARIA" -> "Maria"; single ASCII words only
fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

proptest! {
    /// Property: a created member's full name is each name capitalized,
    /// joined by one space, while the stored names keep their casing
    #[test]
    fn prop_created_member_full_name(first in "[a-zA-Z]{1,20}", last in "[a-zA-Z]{1,20}") {
        let mut engine = GymEngine::open_in_memory().unwrap();
        let expected = format!("{} {}", capitalized(&first), capitalized(&last));

        let created = engine.create_member(&first, &last, "ann@x.com").unwrap();
        let fetched = engine.get_member(created.member_id).unwrap();

        prop_assert_eq!(created.full_name(), expected.clone());
        prop_assert_eq!(fetched.full_name(), expected);
        prop_assert_eq!(fetched.first_name, first);
        prop_assert_eq!(fetched.last_name, last);
    }

    /// Property: deleting a member removes exactly its sessions
    #[test]
    fn prop_delete_member_cascades(own in 0u32..8, others in 0u32..4) {
        let mut engine = GymEngine::open_in_memory().unwrap();
        let ann = engine.create_member("Ann", "Lee", "ann@x.com").unwrap();
        let bob = engine.create_member("Bob", "Ray", "bob@x.com").unwrap();
        for i in 0..own {
            engine.create_workout_session(ann.member_id, date(2024, 1, 1 + i), "rowing", 20).unwrap();
        }
        for i in 0..others {
            engine.create_workout_session(bob.member_id, date(2024, 2, 1 + i), "rowing", 20).unwrap();
        }

        engine.delete_member(ann.member_id).unwrap();

        let remaining = engine.list_workout_sessions().unwrap();
        prop_assert_eq!(remaining.len(), others as usize);
        prop_assert!(remaining.iter().all(|s| s.member_id == bob.member_id));
    }

    /// Property: non-positive durations are rejected and nothing is stored
    #[test]
    fn prop_non_positive_duration_rejected(minutes in i64::MIN..=0) {
        let mut engine = GymEngine::open_in_memory().unwrap();
        let ann = engine.create_member("Ann", "Lee", "ann@x.com").unwrap();

        let err = engine
            .create_workout_session(ann.member_id, date(2024, 1, 5), "yoga", minutes)
            .unwrap_err();

        prop_assert!(err.is_validation());
        prop_assert!(engine.list_workout_sessions().unwrap().is_empty());
    }

    /// Property: any positive duration is stored as given
    #[test]
    fn prop_positive_duration_round_trips(minutes in 1i64..=i64::MAX) {
        let mut engine = GymEngine::open_in_memory().unwrap();
        let ann = engine.create_member("Ann", "Lee", "ann@x.com").unwrap();

        let session = engine
            .create_workout_session(ann.member_id, date(2024, 1, 5), "yoga", minutes)
            .unwrap();
        let stored = engine.get_workout_session_detail(session.session_id).unwrap();

        prop_assert_eq!(stored.session.duration_minutes, minutes);
    }

    /// Property: any slice of a stored type, in any ASCII case, finds it
    #[test]
    fn prop_type_search_matches_any_case_substring(
        kind in "[a-z]{1,12}( [a-z]{1,8})?",
        start in 0usize..12,
        len in 1usize..6,
        upper in any::<bool>(),
    ) {
        let mut engine = GymEngine::open_in_memory().unwrap();
        let ann = engine.create_member("Ann", "Lee", "ann@x.com").unwrap();
        engine.create_workout_session(ann.member_id, date(2024, 1, 5), &kind, 30).unwrap();

        let start = start.min(kind.len() - 1);
        let end = (start + len).min(kind.len());
        let needle = &kind[start..end];
        prop_assume!(!needle.trim().is_empty());
        let needle = if upper { needle.to_uppercase() } else { needle.to_string() };

        let found = engine
            .find_workout_sessions(&SessionFilter::default().with_type(needle))
            .unwrap();
        prop_assert_eq!(found.len(), 1);
    }
}
