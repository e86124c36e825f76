// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Request failed validation (missing or malformed fields)
    Validation(String),
    /// Media duration could not be probed
    ProbeFail(String),
    /// Object storage operation failed
    StorageFail(String),
    /// Merge collaborator rejected or failed the submission
    MergeFail(String),
    /// Local filesystem operation failed
    FsFail(String),
}

impl DomainError {
    /// HTTP-equivalent status for this error when surfaced by a collaborator
    pub fn status(&self) -> u16 {
        match self {
            DomainError::BadArgs(_) | DomainError::Validation(_) => 400,
            DomainError::ProbeFail(_)
            | DomainError::StorageFail(_)
            | DomainError::MergeFail(_)
            | DomainError::FsFail(_) => 500,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::StorageFail(msg) => write!(f, "Storage failure: {}", msg),
            DomainError::MergeFail(msg) => write!(f, "Merge failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "Filesystem failure: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
