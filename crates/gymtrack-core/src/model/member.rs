use serde::{Deserialize, Serialize};

use crate::errors::{GymError, Result};
use crate::rules::validation::{title_case, validate_email, validate_name, Violations};

/// Member - a registered gym member
///
/// Members are immutable once stored; the only way to change one is to
/// delete it. Workout sessions are owned by a member and are loaded on
/// demand rather than carried on this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Store-generated identifier, never reassigned
    pub member_id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Unique across all members (exact, case-sensitive match)
    pub email: String,
}

impl Member {
    /// Title-cased "First Last", derived on every call
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            title_case(self.first_name.trim()),
            title_case(self.last_name.trim())
        )
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Email: {}",
            self.member_id,
            self.full_name(),
            self.email
        )
    }
}

/// Request to create a member, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewMember {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Validate every field, reporting all violations at once
    ///
    /// # Errors
    /// `Validation` with one violation per failing field.
    pub fn validate(&self) -> Result<ValidMember> {
        let mut violations = Violations::default();
        let first_name = violations
            .check(validate_name("first_name", &self.first_name))
            .unwrap_or_default();
        let last_name = violations
            .check(validate_name("last_name", &self.last_name))
            .unwrap_or_default();
        let email = violations
            .check(validate_email(&self.email))
            .unwrap_or_default();

        violations
            .into_result()
            .map_err(|violations| GymError::InvalidMember { violations })?;

        Ok(ValidMember {
            first_name,
            last_name,
            email,
        })
    }
}

/// A member request that passed validation; only `NewMember::validate`
/// can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMember {
    first_name: String,
    last_name: String,
    email: String,
}

impl ValidMember {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach the store-generated id
    pub fn into_member(self, member_id: i64) -> Member {
        Member {
            member_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}
