//! Error types for the followup core.

use thiserror::Error;
use uuid::Uuid;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field, as a client would see it.
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// The set of field failures from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum FollowupError {
    #[error("No access credential available")]
    Unauthenticated,

    #[error("Session expired; sign in again")]
    SessionExpired,

    #[error("Contact not found: {0}")]
    ContactNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Drive API error: {status} - {body}")]
    Remote { status: u16, body: String },

    #[error("Drive unreachable: {0}")]
    Unavailable(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FollowupError {
    /// Wrap a non-empty set of field failures.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(ValidationErrors(errors))
    }
}

impl From<reqwest::Error> for FollowupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}
