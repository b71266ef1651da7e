//! OpenAI Chat Completions provider
//!
//! Flat-message provider: one `{role, content}` entry per turn with a
//! leading system entry.

mod provider;
mod types;

pub use provider::OpenAiChatProvider;
