//! Type conversions between AWS Bedrock SDK and domain types
//!
//! Builds Converse API requests from the domain window and turns Converse
//! responses and errors back into plain text or a [`ProviderError`].

use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types as bedrock;
use twin_application::ProviderError;
use twin_domain::{Message, Role, SamplingParams};

// ─── Domain → Bedrock ────────────────────────────────────────────

fn convert_role(role: Role) -> bedrock::ConversationRole {
    match role {
        Role::User => bedrock::ConversationRole::User,
        Role::Assistant => bedrock::ConversationRole::Assistant,
    }
}

/// Build the Converse message list.
///
/// Converse has no system role here, so the prompt travels as a
/// `"System: "` text block in the first user entry. Adjacent entries with
/// the same role are folded into one message with several text blocks,
/// which keeps the user/assistant alternation Converse requires.
pub fn build_messages(
    system_prompt: &str,
    window: &[Message],
    user_message: &str,
) -> Result<Vec<bedrock::Message>, ProviderError> {
    let entries = std::iter::once((Role::User, format!("System: {system_prompt}")))
        .chain(window.iter().map(|m| (m.role, m.content.clone())))
        .chain(std::iter::once((Role::User, user_message.to_string())));

    let mut grouped: Vec<(Role, Vec<bedrock::ContentBlock>)> = Vec::new();
    for (role, text) in entries {
        let block = bedrock::ContentBlock::Text(text);
        match grouped.last_mut() {
            Some((last_role, blocks)) if *last_role == role => blocks.push(block),
            _ => grouped.push((role, vec![block])),
        }
    }

    grouped
        .into_iter()
        .map(|(role, content)| {
            bedrock::Message::builder()
                .role(convert_role(role))
                .set_content(Some(content))
                .build()
                .map_err(|e| {
                    ProviderError::Validation(format!("Failed to build Bedrock message: {}", e))
                })
        })
        .collect()
}

pub fn inference_config(params: SamplingParams) -> bedrock::InferenceConfiguration {
    let builder = bedrock::InferenceConfiguration::builder()
        .max_tokens(i32::try_from(params.max_tokens).unwrap_or(i32::MAX))
        .temperature(params.temperature);
    match params.top_p {
        Some(top_p) => builder.top_p(top_p).build(),
        None => builder.build(),
    }
}

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Extract the reply text from the first content block of the output message.
pub fn extract_reply(output: Option<&bedrock::ConverseOutput>) -> Result<String, ProviderError> {
    match output {
        Some(bedrock::ConverseOutput::Message(message)) => match message.content().first() {
            Some(bedrock::ContentBlock::Text(text)) => Ok(text.clone()),
            _ => Err(ProviderError::Upstream(
                "Bedrock error: response contained no text".to_string(),
            )),
        },
        _ => Err(ProviderError::Upstream(
            "Bedrock error: no output in response".to_string(),
        )),
    }
}

/// Classify a modeled Converse service error.
pub fn classify_service_error(err: &ConverseError) -> ProviderError {
    match err {
        ConverseError::ValidationException(_) => {
            ProviderError::Validation("Invalid message format for Bedrock".to_string())
        }
        ConverseError::AccessDeniedException(_) => {
            ProviderError::AccessDenied("Access denied to Bedrock model".to_string())
        }
        other => ProviderError::Upstream(format!("Bedrock error: {}", other)),
    }
}

/// Convert a Bedrock SDK error to a ProviderError.
pub fn convert_converse_error(err: &SdkError<ConverseError>) -> ProviderError {
    match err {
        SdkError::ServiceError(service_err) => classify_service_error(service_err.err()),
        other => ProviderError::Upstream(format!("Bedrock error: {}", DisplayErrorContext(other))),
    }
}
