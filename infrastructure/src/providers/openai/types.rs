//! OpenAI Chat Completions wire types.

use serde::{Deserialize, Serialize};
use twin_application::ProviderError;
use twin_domain::{Message, SamplingParams};

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Build the flat message list: system entry, the window, then the new user entry.
pub fn build_messages(system_prompt: &str, window: &[Message], user_message: &str) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(window.len() + 2);
    messages.push(WireMessage {
        role: "system",
        content: system_prompt.to_string(),
    });
    messages.extend(window.iter().map(|m| WireMessage {
        role: m.role.as_str(),
        content: m.content.clone(),
    }));
    messages.push(WireMessage {
        role: "user",
        content: user_message.to_string(),
    });
    messages
}

pub fn build_request(
    model: &str,
    messages: Vec<WireMessage>,
    sampling: SamplingParams,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: sampling.temperature,
        max_tokens: sampling.max_tokens,
        top_p: sampling.top_p,
    }
}

/// Take the first choice's text. A null or missing content is an empty reply.
pub fn extract_reply(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| ProviderError::Upstream("OpenAI error: response had no choices".to_string()))
}
