//! Session store port
//!
//! Defines how conversation histories are read from and written to
//! durable storage, keyed by session id.

use async_trait::async_trait;
use thiserror::Error;
use twin_domain::{Message, SessionId};

/// Errors raised by a session store. A missing record is not an error;
/// it is reported as [`StoreRecord::NotFound`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Corrupt session record: {0}")]
    Serialization(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Outcome of reading a session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRecord {
    Found(Vec<Message>),
    NotFound,
}

impl StoreRecord {
    /// Collapse to a history; a missing record is an empty conversation.
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            StoreRecord::Found(messages) => messages,
            StoreRecord::NotFound => Vec::new(),
        }
    }
}

/// Durable mapping from session id to ordered message history.
///
/// Implementations own the persisted bytes; the whole history is the unit
/// of replacement on every write (last writer wins).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Short backend label, e.g. `"local"` or `"S3"`.
    fn backend(&self) -> &'static str;

    /// Read the stored record, distinguishing "no data yet" from real faults.
    async fn read(&self, session_id: &SessionId) -> Result<StoreRecord, StoreError>;

    /// Replace the stored record with `messages`.
    async fn write(&self, session_id: &SessionId, messages: &[Message]) -> Result<(), StoreError>;

    /// Load a history, treating a missing record as empty.
    async fn load(&self, session_id: &SessionId) -> Result<Vec<Message>, StoreError> {
        Ok(self.read(session_id).await?.into_messages())
    }

    /// Persist a full history.
    async fn save(&self, session_id: &SessionId, messages: &[Message]) -> Result<(), StoreError> {
        self.write(session_id, messages).await
    }
}
