//! Bedrock chat provider
//!
//! Implements `ChatProvider` on top of the stateless Converse API. The
//! window is rebuilt into Converse messages on every call.

use super::types;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use std::sync::Arc;
use tracing::{debug, info};
use twin_application::{ChatProvider, ProviderError};
use twin_domain::{BedrockProviderConfig, Message, ProviderKind, SamplingParams};

pub struct BedrockChatProvider {
    client: Arc<BedrockClient>,
    model_id: String,
    region: String,
    sampling: SamplingParams,
}

impl BedrockChatProvider {
    /// Create a new Bedrock provider.
    ///
    /// Initializes AWS credentials and creates a Bedrock Runtime client.
    pub async fn new(config: &BedrockProviderConfig, model_id: impl Into<String>) -> Self {
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        let aws_config = aws_config_loader.load().await;
        let provider = Self {
            client: Arc::new(BedrockClient::new(&aws_config)),
            model_id: model_id.into(),
            region: config.region.clone(),
            sampling: SamplingParams::BLOCK,
        };
        info!(region = %provider.region, model = %provider.model_id, "Bedrock provider initialized");
        provider
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl ChatProvider for BedrockChatProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bedrock
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
        let messages = types::build_messages(system_prompt, window, user_message)?;

        debug!(
            model = %self.model_id,
            messages = messages.len(),
            "Calling Bedrock Converse API"
        );

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_messages(Some(messages))
            .inference_config(types::inference_config(self.sampling))
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        types::extract_reply(response.output())
    }
}
