//! Field-level validation and normalization rules

pub mod validation;

pub use validation::{
    normalize_workout_type, title_case, validate_duration, validate_email, validate_name,
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_WORKOUT_TYPE_LEN,
};
