//! System prompt port

/// Supplies the system prompt text for each request.
pub trait SystemPromptSource: Send + Sync {
    fn system_prompt(&self) -> String;
}

/// Fixed prompt text.
#[derive(Debug, Clone)]
pub struct StaticPrompt(pub String);

impl StaticPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl SystemPromptSource for StaticPrompt {
    fn system_prompt(&self) -> String {
        self.0.clone()
    }
}
