//! Converse use case.
//!
//! Runs one chat request end to end: load the session history, ask the
//! provider for a reply using the trailing window, append the turn and
//! persist the updated history.
//!
//! Each request is a single linear pipeline. Storage is only written after
//! the provider succeeds, so a failed request leaves the session untouched.
//! Concurrent requests against the same session are not serialized: both
//! load the same history and the last `save` wins.

use crate::ports::chat_provider::{ChatProvider, ProviderError};
use crate::ports::session_store::{SessionStore, StoreError};
use crate::ports::system_prompt::SystemPromptSource;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use twin_domain::{DomainError, Message, SessionId, append_turn, build_window};

/// Errors that can occur while handling a conversation request.
#[derive(Error, Debug)]
pub enum ConverseError {
    #[error(transparent)]
    InvalidSessionId(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Coarse classification used by callers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ClientInput,
    Permission,
    Upstream,
    Storage,
}

impl ConverseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConverseError::InvalidSessionId(_) => ErrorCategory::ClientInput,
            ConverseError::Store(_) => ErrorCategory::Storage,
            ConverseError::Provider(ProviderError::Validation(_)) => ErrorCategory::ClientInput,
            ConverseError::Provider(ProviderError::AccessDenied(_)) => ErrorCategory::Permission,
            ConverseError::Provider(ProviderError::Upstream(_)) => ErrorCategory::Upstream,
        }
    }
}

/// Input for [`ConverseUseCase::handle`].
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub message: String,
    /// Existing session to continue; a new one is created when absent.
    pub session_id: Option<String>,
}

impl ChatInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Result of a successful, durably recorded turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutput {
    pub reply: String,
    pub session_id: SessionId,
}

/// Conversation orchestrator.
///
/// Holds process-wide handles constructed once at startup; no request
/// mutates them.
#[derive(Clone)]
pub struct ConverseUseCase {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn ChatProvider>,
    prompt: Arc<dyn SystemPromptSource>,
}

impl ConverseUseCase {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn ChatProvider>,
        prompt: Arc<dyn SystemPromptSource>,
    ) -> Self {
        Self {
            store,
            provider,
            prompt,
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn ChatProvider> {
        &self.provider
    }

    /// Handle one chat message.
    ///
    /// The reply is only returned once the updated history has been saved.
    pub async fn handle(&self, input: ChatInput) -> Result<ChatOutput, ConverseError> {
        let session_id = SessionId::resolve(input.session_id)?;
        info!(session = %session_id, provider = %self.provider.kind(), "Handling chat message");

        let history = self.store.load(&session_id).await.inspect_err(|e| {
            error!(session = %session_id, "Failed to load conversation: {}", e);
        })?;
        let window = build_window(&history);
        debug!(
            session = %session_id,
            stored = history.len(),
            window = window.len(),
            "Built context window"
        );

        let system_prompt = self.prompt.system_prompt();
        let reply = self
            .provider
            .generate(&system_prompt, window, &input.message)
            .await
            .inspect_err(|e| {
                warn!(session = %session_id, provider = %self.provider.kind(), "Generation failed: {}", e);
            })?;

        let updated = append_turn(&history, &input.message, &reply);
        self.store.save(&session_id, &updated).await.inspect_err(|e| {
            error!(session = %session_id, "Failed to save conversation: {}", e);
        })?;

        info!(session = %session_id, messages = updated.len(), "Conversation saved");
        Ok(ChatOutput { reply, session_id })
    }

    /// Read a session's full stored history.
    pub async fn fetch(&self, session_id: &str) -> Result<Vec<Message>, ConverseError> {
        let session_id = SessionId::parse(session_id)?;
        Ok(self.store.load(&session_id).await?)
    }
}
