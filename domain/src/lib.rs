//! Domain layer for digital-twin
//!
//! This crate contains the core conversation entities and the rules that
//! govern session history. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: an opaque id owning an append-only list of [`Message`]s
//! - **Window**: the trailing slice of history shown to a provider
//! - **Turn**: a user message and the assistant reply, always appended together

pub mod config;
pub mod core;
pub mod providers;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigError, PromptConfig, ServerConfig, ServiceConfig};
pub use crate::core::error::DomainError;
pub use providers::{
    BedrockProviderConfig, OpenAiProviderConfig, ProviderConfig, ProviderKind, SamplingParams,
};
pub use session::{
    entities::{Message, Role},
    history::{CONTEXT_WINDOW_MESSAGES, append_turn, build_window, new_turn},
    id::SessionId,
};
pub use storage::StorageConfig;
