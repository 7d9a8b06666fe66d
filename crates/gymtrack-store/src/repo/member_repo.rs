//! SQL for the `members` table

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, is_unique_violation, Result};
use crate::unit_of_work::UnitOfWork;
use gymtrack_core::errors::{ExError, GymError};
use gymtrack_core::model::{Member, ValidMember};
use rusqlite::{OptionalExtension, Row};

const MEMBER_COLUMNS: &str = "member_id, first_name, last_name, email";

/// Map a `members` row selected with [`MEMBER_COLUMNS`]
pub(crate) fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        member_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}

/// Repository for members
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a validated member and return it with its generated id
    ///
    /// # Errors
    /// `Integrity` if the e-mail is already registered.
    pub fn insert(uow: &UnitOfWork<'_>, member: &ValidMember) -> Result<Member> {
        uow.tx()
            .execute(
                "INSERT INTO members (first_name, last_name, email) VALUES (?1, ?2, ?3)",
                rusqlite::params![member.first_name(), member.last_name(), member.email()],
            )
            .map_err(|e| {
                if is_unique_violation(&e, "members.email") {
                    ExError::from(GymError::DuplicateEmail {
                        email: member.email().to_string(),
                    })
                } else {
                    from_rusqlite(e)
                }
            })?;

        let member_id = uow.tx().last_insert_rowid();
        Ok(member.clone().into_member(member_id))
    }

    /// Get a member by id
    pub fn get(uow: &UnitOfWork<'_>, member_id: i64) -> Result<Option<Member>> {
        uow.tx()
            .query_row(
                &format!("SELECT {} FROM members WHERE member_id = ?1", MEMBER_COLUMNS),
                [member_id],
                member_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    pub fn exists(uow: &UnitOfWork<'_>, member_id: i64) -> Result<bool> {
        uow.tx()
            .query_row(
                "SELECT 1 FROM members WHERE member_id = ?1",
                [member_id],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(from_rusqlite)
    }

    /// Exact, case-sensitive e-mail lookup
    pub fn find_by_email(uow: &UnitOfWork<'_>, email: &str) -> Result<Option<Member>> {
        uow.tx()
            .query_row(
                &format!("SELECT {} FROM members WHERE email = ?1", MEMBER_COLUMNS),
                [email],
                member_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    /// All members, ordered by id
    pub fn list(uow: &UnitOfWork<'_>) -> Result<Vec<Member>> {
        let mut stmt = uow
            .tx()
            .prepare(&format!(
                "SELECT {} FROM members ORDER BY member_id",
                MEMBER_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let members = stmt
            .query_map([], member_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(members)
    }

    /// Delete a member; owned sessions go with it through the foreign key's
    /// `ON DELETE CASCADE`
    ///
    /// Returns false if no such member existed.
    pub fn delete(uow: &UnitOfWork<'_>, member_id: i64) -> Result<bool> {
        let affected = uow
            .tx()
            .execute("DELETE FROM members WHERE member_id = ?1", [member_id])
            .map_err(from_rusqlite)?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use gymtrack_core::model::NewMember;

    fn valid(first: &str, last: &str, email: &str) -> ValidMember {
        NewMember::new(first, last, email).validate().unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.acquire().unwrap();
        let a = MemberRepo::insert(&uow, &valid("Ann", "Lee", "ann@x.com")).unwrap();
        let b = MemberRepo::insert(&uow, &valid("Bob", "Ray", "bob@x.com")).unwrap();
        uow.commit().unwrap();

        assert_eq!(a.member_id, 1);
        assert_eq!(b.member_id, 2);
    }

    #[test]
    fn test_duplicate_email_is_integrity() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.acquire().unwrap();
        MemberRepo::insert(&uow, &valid("Ann", "Lee", "ann@x.com")).unwrap();
        let err = MemberRepo::insert(&uow, &valid("Other", "Ann", "ann@x.com")).unwrap_err();

        assert!(err.is_integrity());
        assert!(err.message().contains("already registered"));
    }

    #[test]
    fn test_find_by_email_is_exact() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.acquire().unwrap();
        MemberRepo::insert(&uow, &valid("Ann", "Lee", "ann@x.com")).unwrap();

        assert!(MemberRepo::find_by_email(&uow, "ann@x.com").unwrap().is_some());
        assert!(MemberRepo::find_by_email(&uow, "ann@x.co").unwrap().is_none());
        assert!(MemberRepo::find_by_email(&uow, "ANN@X.COM").unwrap().is_none());
        assert!(MemberRepo::find_by_email(&uow, "ann").unwrap().is_none());
    }

    #[test]
    fn test_delete_reports_missing() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.acquire().unwrap();
        let ann = MemberRepo::insert(&uow, &valid("Ann", "Lee", "ann@x.com")).unwrap();

        assert!(MemberRepo::delete(&uow, ann.member_id).unwrap());
        assert!(!MemberRepo::delete(&uow, ann.member_id).unwrap());
        assert!(!MemberRepo::exists(&uow, ann.member_id).unwrap());
    }
}
