//! Chat provider port
//!
//! Hides the wire-format differences between inference backends behind a
//! single `generate` call. Exactly one implementation is active per process.

use async_trait::async_trait;
use thiserror::Error;
use twin_domain::{Message, ProviderKind};

/// Errors that can occur while generating a reply.
///
/// None of these are retried; they surface to the caller immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request shape was rejected by the provider (client input).
    #[error("{0}")]
    Validation(String),

    /// The provider refused access to the model.
    #[error("{0}")]
    AccessDenied(String),

    /// Any other provider-side or transport failure.
    #[error("{0}")]
    Upstream(String),
}

/// A text-generation backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Which backend family this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Model identifier sent with each request.
    fn model_id(&self) -> &str;

    /// Generate a reply for `user_message`, given the system prompt and the
    /// windowed history (oldest first).
    async fn generate(
        &self,
        system_prompt: &str,
        window: &[Message],
        user_message: &str,
    ) -> Result<String, ProviderError>;
}
