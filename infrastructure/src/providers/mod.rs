//! Chat provider adapters.
//!
//! Exactly one provider is constructed per process, chosen by
//! [`ProviderConfig::kind`]. There is no fallback between providers.

#[cfg(feature = "bedrock")]
pub mod bedrock;
#[cfg(feature = "openai")]
pub mod openai;

use std::sync::Arc;
use twin_application::ChatProvider;
use twin_domain::{ConfigError, ProviderConfig, ProviderKind};

/// Construct the configured chat provider. Called once at startup.
pub async fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn ChatProvider>, ConfigError> {
    if config.model_id.trim().is_empty() {
        return Err(ConfigError::EmptyModelId(config.kind.to_string()));
    }

    match config.kind {
        #[cfg(feature = "openai")]
        ProviderKind::OpenAi => Ok(Arc::new(openai::OpenAiChatProvider::new(
            &config.openai,
            config.model_id.clone(),
        )?)),
        #[cfg(feature = "bedrock")]
        ProviderKind::Bedrock => Ok(Arc::new(
            bedrock::BedrockChatProvider::new(&config.bedrock, config.model_id.clone()).await,
        )),
        #[allow(unreachable_patterns)]
        other => Err(ConfigError::ProviderUnavailable(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twin_domain::{BedrockProviderConfig, OpenAiProviderConfig};

    fn config(kind: ProviderKind, model_id: &str) -> ProviderConfig {
        ProviderConfig {
            kind,
            model_id: model_id.to_string(),
            openai: OpenAiProviderConfig {
                api_key: Some("sk-test".to_string()),
                ..Default::default()
            },
            bedrock: BedrockProviderConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_empty_model_id_is_rejected() {
        let err = build_provider(&config(ProviderKind::OpenAi, " "))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::EmptyModelId(_)));
    }

    #[cfg(feature = "openai")]
    #[tokio::test]
    async fn test_builds_openai_provider() {
        let provider = build_provider(&config(ProviderKind::OpenAi, "gpt-4o-mini"))
            .await
            .unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
        assert_eq!(provider.model_id(), "gpt-4o-mini");
    }
}
