//! AWS Bedrock Converse API provider
//!
//! Block-content provider: every turn is `{role, content: [{text}]}` and
//! the system prompt rides inside the first user entry.

mod provider;
mod types;

pub use provider::BedrockChatProvider;
