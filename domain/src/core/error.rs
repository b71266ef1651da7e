//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_session_id_display() {
        let error = DomainError::InvalidSessionId("session id cannot be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid session id: session id cannot be empty"
        );
    }
}
