use std::sync::OnceLock;

use regex::Regex;

use crate::errors::FieldViolation;

/// Longest accepted first or last name, in characters
pub const MAX_NAME_LEN: usize = 50;

/// Longest accepted e-mail address, in characters
pub const MAX_EMAIL_LEN: usize = 100;

/// Longest accepted workout type, in characters
pub const MAX_WORKOUT_TYPE_LEN: usize = 50;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Compiled once; `None` only if the pattern fails to compile, in which
/// case every address is rejected
fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

/// Title-case a value
///
/// The first letter of every run of letters is upper-cased and the rest of
/// the run lower-cased, so "hiit cardio" becomes "Hiit Cardio" and
/// "o'neil" becomes "O'Neil".
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Validate a first or last name, returning the trimmed value
pub fn validate_name(
    field: &'static str,
    value: &str,
) -> std::result::Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(field, "is required"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(FieldViolation::new(
            field,
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate an e-mail address against a basic `local@domain.tld` shape
pub fn validate_email(value: &str) -> std::result::Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new("email", "is required"));
    }
    if trimmed.chars().count() > MAX_EMAIL_LEN {
        return Err(FieldViolation::new(
            "email",
            format!("must be at most {} characters", MAX_EMAIL_LEN),
        ));
    }
    if !email_pattern().is_some_and(|re| re.is_match(trimmed)) {
        return Err(FieldViolation::new("email", "is not a valid email address"));
    }
    Ok(trimmed.to_string())
}

/// Normalize a workout type to trimmed title case
pub fn normalize_workout_type(value: &str) -> std::result::Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new("workout_type", "cannot be empty"));
    }
    if trimmed.chars().count() > MAX_WORKOUT_TYPE_LEN {
        return Err(FieldViolation::new(
            "workout_type",
            format!("must be at most {} characters", MAX_WORKOUT_TYPE_LEN),
        ));
    }
    Ok(title_case(trimmed))
}

/// Duration must be a strictly positive number of minutes
pub fn validate_duration(minutes: i64) -> std::result::Result<i64, FieldViolation> {
    if minutes <= 0 {
        return Err(FieldViolation::new(
            "duration_minutes",
            "must be a positive integer",
        ));
    }
    Ok(minutes)
}

/// Collects violations across several fields so that one failure does not
/// hide the next.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<FieldViolation>);

impl Violations {
    pub(crate) fn check<T>(
        &mut self,
        result: std::result::Result<T, FieldViolation>,
    ) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(violation) => {
                self.0.push(violation);
                None
            }
        }
    }

    pub(crate) fn into_result(self) -> std::result::Result<(), Vec<FieldViolation>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}
