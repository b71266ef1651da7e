//! OpenAI chat provider
//!
//! Flat-message provider backed by the Chat Completions endpoint. Every
//! failure (transport, non-2xx status, undecodable body) is an upstream
//! error; nothing is retried.

use super::types::{self, ChatCompletionResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;
use twin_application::{ChatProvider, ProviderError};
use twin_domain::{ConfigError, Message, OpenAiProviderConfig, ProviderKind, SamplingParams};

pub struct OpenAiChatProvider {
    client: reqwest::Client,
    endpoint: String,
    model_id: String,
    sampling: SamplingParams,
}

impl OpenAiChatProvider {
    /// Create a provider from configuration. A missing API key is a
    /// startup error.
    pub fn new(
        config: &OpenAiProviderConfig,
        model_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ConfigError::Invalid(format!(
                "OpenAI API key not set (expected in ${})",
                config.api_key_env
            ))
        })?;
        Self::with_api_key(config, api_key, model_id)
    }

    pub fn with_api_key(
        config: &OpenAiProviderConfig,
        api_key: impl AsRef<str>,
        model_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.as_ref()))
            .map_err(|e| ConfigError::Invalid(format!("Invalid OpenAI API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            model_id: model_id.into(),
            sampling: SamplingParams::FLAT,
        })
    }
}

fn upstream(detail: impl std::fmt::Display) -> ProviderError {
    ProviderError::Upstream(format!("OpenAI error: {}", detail))
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(
        &self,
        system_prompt: &str,
        window: &[Message],
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let messages = types::build_messages(system_prompt, window, user_message);
        let request = types::build_request(&self.model_id, messages, self.sampling);

        debug!(
            model = %self.model_id,
            messages = request.messages.len(),
            "Calling OpenAI Chat Completions API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(upstream)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream(format!("{}: {}", status, body)));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(upstream)?;
        types::extract_reply(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use std::sync::{Arc, Mutex};
    use twin_domain::Role;

    async fn spawn_fake(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider_for(base_url: String) -> OpenAiChatProvider {
        let config = OpenAiProviderConfig {
            base_url,
            ..Default::default()
        };
        OpenAiChatProvider::with_api_key(&config, "sk-test", "gpt-4o-mini").unwrap()
    }

    #[tokio::test]
    async fn test_generate_posts_flat_messages() {
        let seen = Arc::new(Mutex::new(None::<serde_json::Value>));
        let captured = seen.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(body): Json<serde_json::Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(serde_json::json!({
                        "choices": [{"message": {"role": "assistant", "content": "hi back"}}]
                    }))
                }
            }),
        );
        let provider = provider_for(spawn_fake(app).await);
        let window = vec![
            Message::with_timestamp(Role::User, "earlier", "t0"),
            Message::with_timestamp(Role::Assistant, "reply", "t1"),
        ];

        let reply = provider.generate("persona", &window, "hi").await.unwrap();

        assert_eq!(reply, "hi back");
        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"].as_array().unwrap().len(), 4);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][3]["content"], "hi");
    }

    #[tokio::test]
    async fn test_error_status_is_upstream() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let provider = provider_for(spawn_fake(app).await);

        let err = provider.generate("p", &[], "hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Upstream(ref m) if m.contains("401")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream() {
        let provider = provider_for("http://127.0.0.1:1".to_string());
        let err = provider.generate("p", &[], "hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Upstream(_)));
    }

    #[test]
    fn test_missing_key_fails_at_construction() {
        let config = OpenAiProviderConfig {
            api_key_env: "TWIN_TEST_UNSET_OPENAI_KEY".to_string(),
            ..Default::default()
        };
        assert!(OpenAiChatProvider::new(&config, "gpt-4o-mini").is_err());
    }
}
