//! Application layer for digital-twin
//!
//! This crate contains the conversation use case and the port definitions
//! its adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_provider::{ChatProvider, ProviderError},
    session_store::{SessionStore, StoreError, StoreRecord},
    system_prompt::{StaticPrompt, SystemPromptSource},
};
pub use use_cases::converse::{
    ChatInput, ChatOutput, ConverseError, ConverseUseCase, ErrorCategory,
};
