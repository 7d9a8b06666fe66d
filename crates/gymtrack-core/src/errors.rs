use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the data layer falls into one of these kinds.
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Input fails a field or record invariant; nothing was written
    Validation,
    /// A referenced member id, session id, or e-mail does not exist
    NotFound,
    /// A uniqueness or foreign-key rule was rejected by the store
    Integrity,
    /// Unexpected failure talking to the store
    Storage,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Integrity => "ERR_INTEGRITY",
            ExErrorKind::Storage => "ERR_STORAGE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// One itemized validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus
/// optional context for humans and logs.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    violations: Vec<FieldViolation>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            violations: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach itemized validation failures
    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the itemized validation failures (empty for non-validation kinds)
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// True if a violation was recorded for `field`
    pub fn has_violation(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ExErrorKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }

    pub fn is_integrity(&self) -> bool {
        self.kind == ExErrorKind::Integrity
    }

    pub fn is_storage(&self) -> bool {
        self.kind == ExErrorKind::Storage
    }

    /// Override the operation context only if none is set yet
    pub fn or_op(mut self, op: &str) -> Self {
        if self.op.is_none() {
            self.op = Some(op.to_string());
        }
        self
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if !self.violations.is_empty() {
            let items: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
            write!(f, " [{}]", items.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for gymtrack operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GymError {
    // ===== Validation Errors =====
    /// Member fields failed validation
    #[error("Invalid member: {}", join_violations(.violations))]
    InvalidMember { violations: Vec<FieldViolation> },

    /// Workout session fields failed validation
    #[error("Invalid workout session: {}", join_violations(.violations))]
    InvalidWorkoutSession { violations: Vec<FieldViolation> },

    // ===== Lookup Errors =====
    #[error("Member not found: {member_id}")]
    MemberNotFound { member_id: i64 },

    #[error("Workout session not found: {session_id}")]
    WorkoutSessionNotFound { session_id: i64 },

    /// No member is registered under the e-mail (exact match)
    #[error("No member found with that email")]
    MemberEmailNotFound { email: String },

    // ===== Integrity Errors =====
    /// Another member already uses the e-mail
    #[error("Email is already registered")]
    DuplicateEmail { email: String },

    // ===== Generic Errors =====
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<GymError> for ExError {
    fn from(err: GymError) -> Self {
        let message = err.to_string();
        match err {
            GymError::InvalidMember { violations } => ExError::new(ExErrorKind::Validation)
                .with_message("Invalid member")
                .with_violations(violations),

            GymError::InvalidWorkoutSession { violations } => {
                ExError::new(ExErrorKind::Validation)
                    .with_message("Invalid workout session")
                    .with_violations(violations)
            }

            GymError::MemberNotFound { member_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(member_id)
                .with_message("Member not found"),

            GymError::WorkoutSessionNotFound { session_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(session_id)
                    .with_message("Workout session not found")
            }

            // The address itself stays out of the error; callers already have it.
            GymError::MemberEmailNotFound { .. } => {
                ExError::new(ExErrorKind::NotFound).with_message(message)
            }

            GymError::DuplicateEmail { .. } => {
                ExError::new(ExErrorKind::Integrity).with_message(message)
            }

            GymError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
