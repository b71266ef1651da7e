//! Session identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a conversation session (Value Object)
///
/// Ids double as storage key stems (`<id>.json`), so anything that could
/// escape a directory or bucket prefix is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Validate a caller-supplied identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::InvalidSessionId(
                "session id cannot be empty".to_string(),
            ));
        }
        if raw.contains(['/', '\\', '\0']) || raw == "." || raw == ".." {
            return Err(DomainError::InvalidSessionId(format!(
                "session id contains forbidden characters: {raw}"
            )));
        }
        Ok(Self(raw))
    }

    /// Use the supplied id when present, otherwise generate one.
    ///
    /// A blank id counts as absent and starts a new session.
    pub fn resolve(raw: Option<String>) -> Result<Self, DomainError> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::parse(raw),
            _ => Ok(Self::generate()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key for this session's record.
    pub fn record_key(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
