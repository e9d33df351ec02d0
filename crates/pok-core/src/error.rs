//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A command precondition was violated. No event was appended.
    #[error("validation error: {0}")]
    Validation(String),

    /// The storage medium is unavailable or holds an unreadable blob.
    #[error("persistence error: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_error_kind() {
        assert_eq!(
            DomainError::Validation("game already started".into()).to_string(),
            "validation error: game already started"
        );
        assert_eq!(
            DomainError::Persistence("disk full".into()).to_string(),
            "persistence error: disk full"
        );
    }
}
