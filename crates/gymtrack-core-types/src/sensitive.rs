//! Sensitive data marker for automatic redaction
//!
//! Member e-mail addresses are personal data. Wrapping them in
//! `Sensitive<T>` keeps them out of log output and debug dumps while still
//! letting an operator see which mail domain an event concerned.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use gymtrack_core_types::Sensitive;
///
/// let email = Sensitive::new("ann@example.com");
/// assert_eq!(format!("{:?}", email), "***REDACTED***");
/// assert_eq!(format!("{}", email), "***@example.com");
///
/// // Access the actual value when needed
/// assert_eq!(email.expose(), &"ann@example.com");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Display keeps the part after the last `@` (the mail domain) and masks
/// everything before it. Values without an `@` are fully redacted.
impl<T: AsRef<str>> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_ref().rsplit_once('@') {
            Some((_, domain)) if !domain.is_empty() => write!(f, "***@{}", domain),
            _ => f.write_str(REDACTED),
        }
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let secret = Sensitive::new("ann@example.com");
        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, "***REDACTED***");
        assert!(!debug_str.contains("ann"));
    }

    #[test]
    fn test_display_keeps_only_domain() {
        let email = Sensitive::new(String::from("ann.lee@gym.example"));
        assert_eq!(email.to_string(), "***@gym.example");
    }

    #[test]
    fn test_display_without_at_sign_is_fully_redacted() {
        assert_eq!(Sensitive::new("not-an-email").to_string(), REDACTED);
        assert_eq!(Sensitive::new("trailing@").to_string(), REDACTED);
    }

    #[test]
    fn test_expose_and_into_inner() {
        let email = Sensitive::new("ann@x.com".to_string());
        assert_eq!(email.expose(), "ann@x.com");
        assert_eq!(email.clone().into_inner(), "ann@x.com");
    }
}
