// Unit-of-work behaviour against a file-backed store.

use chrono::NaiveDate;
use gymtrack_core::errors::ExErrorKind;
use gymtrack_core::model::{NewMember, NewWorkoutSession};
use gymtrack_store::{Database, MemberRepo, SessionRepo};
use tempfile::TempDir;

fn setup_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path().join("test.db")).unwrap();
    (temp_dir, db)
}

#[test]
fn test_committed_work_visible_to_next_unit() {
    let (_tmp, mut db) = setup_db();
    let ann = NewMember::new("Ann", "Lee", "ann@x.com").validate().unwrap();

    let member = db.run("create", |uow| MemberRepo::insert(uow, &ann)).unwrap();
    let fetched = db
        .run("get", |uow| MemberRepo::get(uow, member.member_id))
        .unwrap();

    assert_eq!(fetched, Some(member));
}

#[test]
fn test_failed_unit_leaves_no_partial_writes() {
    let (_tmp, mut db) = setup_db();
    let ann = NewMember::new("Ann", "Lee", "ann@x.com").validate().unwrap();
    let orphan = NewWorkoutSession::new(99, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), "yoga", 20)
        .validate()
        .unwrap();

    let err = db
        .run("mixed", |uow| {
            MemberRepo::insert(uow, &ann)?;
            SessionRepo::insert(uow, &orphan)
        })
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Integrity);
    let members = db.run("list", MemberRepo::list).unwrap();
    assert!(members.is_empty());
}

#[test]
fn test_duplicate_email_maps_to_integrity() {
    let (_tmp, mut db) = setup_db();
    let ann = NewMember::new("Ann", "Lee", "ann@x.com").validate().unwrap();
    db.run("first", |uow| MemberRepo::insert(uow, &ann)).unwrap();

    let err = db
        .run("second", |uow| MemberRepo::insert(uow, &ann))
        .unwrap_err();

    assert!(err.is_integrity());
    assert_eq!(err.op(), Some("second"));
    assert!(!err.to_string().contains("ann@x.com"));
}

#[test]
fn test_panicking_work_rolls_back() {
    let (_tmp, mut db) = setup_db();
    let ann = NewMember::new("Ann", "Lee", "ann@x.com").validate().unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = db.run("boom", |uow| -> gymtrack_store::Result<()> {
            MemberRepo::insert(uow, &ann)?;
            panic!("work failed midway");
        });
    }));
    assert!(result.is_err());

    let members = db.run("list", MemberRepo::list).unwrap();
    assert!(members.is_empty());
}
