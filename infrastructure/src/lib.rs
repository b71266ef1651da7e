//! Infrastructure layer for digital-twin
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration loading.

pub mod config;
pub mod prompt;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, FilePrompt, build_prompt_source};
pub use providers::build_provider;
pub use storage::{LocalSessionStore, build_session_store};
#[cfg(feature = "s3")]
pub use storage::S3SessionStore;
