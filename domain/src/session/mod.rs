//! Conversation session domain.
//!
//! - [`entities::Message`] — a single stored message
//! - [`id::SessionId`] — opaque session identifier
//! - [`history`] — context window and turn append rules

pub mod entities;
pub mod history;
pub mod id;
