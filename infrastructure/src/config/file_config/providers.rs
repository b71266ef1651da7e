//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};
use twin_domain::{
    BedrockProviderConfig, ConfigError, OpenAiProviderConfig, ProviderConfig, ProviderKind,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region for Bedrock models (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials
    pub profile: Option<String>,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended — use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (can be overridden for compatible APIs).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Active provider: "openai" or "bedrock".
    pub model_use: String,
    /// Model used when `model_use = "openai"`.
    pub openai_model_id: String,
    /// Model used when `model_use = "bedrock"`.
    pub bedrock_model_id: String,
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
    /// AWS Bedrock settings.
    pub bedrock: FileBedrockConfig,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model_use: "openai".to_string(),
            openai_model_id: "gpt-4o-mini".to_string(),
            bedrock_model_id: "amazon.nova-lite-v1:0".to_string(),
            openai: FileOpenAiConfig::default(),
            bedrock: FileBedrockConfig::default(),
        }
    }
}

impl FileProviderConfig {
    pub fn resolve(&self) -> Result<ProviderConfig, ConfigError> {
        let kind: ProviderKind = self.model_use.parse()?;
        let model_id = match kind {
            ProviderKind::OpenAi => &self.openai_model_id,
            ProviderKind::Bedrock => &self.bedrock_model_id,
        };
        if model_id.trim().is_empty() {
            return Err(ConfigError::EmptyModelId(kind.to_string()));
        }

        Ok(ProviderConfig {
            kind,
            model_id: model_id.trim().to_string(),
            openai: OpenAiProviderConfig {
                api_key_env: self.openai.api_key_env.clone(),
                api_key: self.openai.api_key.clone(),
                base_url: self.openai.base_url.clone(),
                timeout_seconds: self.openai.timeout_seconds,
            },
            bedrock: BedrockProviderConfig {
                region: self.bedrock.region.clone(),
                profile: self.bedrock.profile.clone(),
            },
        })
    }
}
