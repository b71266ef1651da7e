//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

use crate::config::ConfigError;

/// Which inference backend serves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// Flat role/content message list (OpenAI Chat Completions).
    #[default]
    OpenAi,
    /// Nested content-block messages (AWS Bedrock Converse).
    Bedrock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Bedrock => "bedrock",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "bedrock" => Ok(ProviderKind::Bedrock),
            other => Err(ConfigError::InvalidProvider(other.to_string())),
        }
    }
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Nucleus probability; only sent when set.
    pub top_p: Option<f32>,
}

impl SamplingParams {
    /// Parameters used with the flat-message provider.
    pub const FLAT: Self = Self {
        temperature: 0.7,
        max_tokens: 2000,
        top_p: None,
    };

    /// Parameters used with the block-content provider.
    pub const BLOCK: Self = Self {
        temperature: 0.7,
        max_tokens: 2000,
        top_p: Some(0.9),
    };
}

/// Active provider selection, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Model identifier for the selected provider.
    pub model_id: String,
    pub openai: OpenAiProviderConfig,
    pub bedrock: BedrockProviderConfig,
}

impl ProviderConfig {
    /// Sampling parameters for the selected provider.
    pub fn sampling(&self) -> SamplingParams {
        match self.kind {
            ProviderKind::OpenAi => SamplingParams::FLAT,
            ProviderKind::Bedrock => SamplingParams::BLOCK,
        }
    }
}

/// AWS Bedrock provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockProviderConfig {
    /// AWS region (default: "us-east-1").
    pub region: String,
    /// AWS profile name for credentials.
    pub profile: Option<String>,
}

impl Default for BedrockProviderConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiProviderConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended — use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl OpenAiProviderConfig {
    /// Resolve the API key: direct value first, then the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }
}

impl Default for OpenAiProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            timeout_seconds: 120,
        }
    }
}
