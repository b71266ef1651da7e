//! Session record encoding.
//!
//! A record is a pretty-printed (2-space indent) JSON array of
//! `{role, content, timestamp}` objects, shared by every backend.

use twin_application::StoreError;
use twin_domain::Message;

pub(crate) fn encode_history(messages: &[Message]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(messages).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub(crate) fn decode_history(bytes: &[u8]) -> Result<Vec<Message>, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
