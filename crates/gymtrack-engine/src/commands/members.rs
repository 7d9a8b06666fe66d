//! Member operations.

#![allow(clippy::result_large_err)]

use crate::engine::{finish, GymEngine};
use gymtrack_core::errors::GymError;
use gymtrack_core::log_op_start;
use gymtrack_core::model::{Member, MemberSessions, NewMember, WorkoutSession};
use gymtrack_core_types::Sensitive;
use gymtrack_store::{MemberRepo, Result, SessionRepo};
use std::time::Instant;

impl GymEngine {
    /// Register a new member
    ///
    /// ## Errors
    ///
    /// - `Validation`: a name is blank or the e-mail is malformed; checked
    ///   before the store is touched
    /// - `Integrity`: the e-mail is already registered
    pub fn create_member(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Member> {
        const OP: &str = "create_member";
        log_op_start!(OP, email = %Sensitive::new(email));
        let start = Instant::now();

        let result = NewMember::new(first_name, last_name, email)
            .validate()
            .and_then(|valid| self.db.run(OP, |uow| MemberRepo::insert(uow, &valid)));

        if let Ok(member) = &result {
            tracing::debug!(member_id = member.member_id, "member created");
        }
        finish(OP, start, result)
    }

    /// Delete a member and, through the cascade, every session it owns
    ///
    /// Returns the deleted member. Confirmation is the caller's job.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no member with that id
    pub fn delete_member(&mut self, member_id: i64) -> Result<Member> {
        const OP: &str = "delete_member";
        log_op_start!(OP, member_id = member_id);
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            let member = MemberRepo::get(uow, member_id)?
                .ok_or(GymError::MemberNotFound { member_id })?;
            MemberRepo::delete(uow, member_id)?;
            Ok(member)
        });

        finish(OP, start, result)
    }

    /// All members, ordered by id
    ///
    /// The returned list is finite and can be iterated any number of times;
    /// no unit of work is held once this returns.
    pub fn list_members(&mut self) -> Result<Vec<Member>> {
        const OP: &str = "list_members";
        log_op_start!(OP);
        let start = Instant::now();

        let result = self.db.run(OP, MemberRepo::list);
        if let Ok(members) = &result {
            tracing::debug!(row_count = members.len(), "members listed");
        }
        finish(OP, start, result)
    }

    /// Get one member by id
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no member with that id
    pub fn get_member(&mut self, member_id: i64) -> Result<Member> {
        const OP: &str = "get_member";
        log_op_start!(OP, member_id = member_id);
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            Ok(MemberRepo::get(uow, member_id)?.ok_or(GymError::MemberNotFound { member_id })?)
        });

        finish(OP, start, result)
    }

    /// Every session owned by a member, in insertion order
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no member with that id
    pub fn get_member_sessions(&mut self, member_id: i64) -> Result<Vec<WorkoutSession>> {
        const OP: &str = "get_member_sessions";
        log_op_start!(OP, member_id = member_id);
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            if !MemberRepo::exists(uow, member_id)? {
                return Err(GymError::MemberNotFound { member_id }.into());
            }
            SessionRepo::list_for_member(uow, member_id)
        });

        finish(OP, start, result)
    }

    /// A member and its sessions, read in one unit of work
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no member with that id
    pub fn get_member_with_sessions(&mut self, member_id: i64) -> Result<MemberSessions> {
        const OP: &str = "get_member_with_sessions";
        log_op_start!(OP, member_id = member_id);
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            let member = MemberRepo::get(uow, member_id)?
                .ok_or(GymError::MemberNotFound { member_id })?;
            let sessions = SessionRepo::list_for_member(uow, member_id)?;
            Ok(MemberSessions { member, sessions })
        });

        if let Ok(found) = &result {
            tracing::debug!(row_count = found.sessions.len(), "member sessions loaded");
        }
        finish(OP, start, result)
    }

    /// Look a member up by e-mail (exact match only)
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no member has exactly this e-mail
    pub fn find_member_by_email(&mut self, email: &str) -> Result<Member> {
        const OP: &str = "find_member_by_email";
        log_op_start!(OP, email = %Sensitive::new(email));
        let start = Instant::now();

        let result = self.db.run(OP, |uow| {
            Ok(MemberRepo::find_by_email(uow, email)?.ok_or_else(|| {
                GymError::MemberEmailNotFound {
                    email: email.to_string(),
                }
            })?)
        });

        finish(OP, start, result)
    }
}
