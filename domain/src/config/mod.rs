//! Resolved service configuration.
//!
//! Built once before the first request is served and never mutated
//! afterwards. Raw file/env values are converted into these types by the
//! infrastructure layer; any invalid selector surfaces as [`ConfigError`].

use crate::providers::ProviderConfig;
use crate::storage::StorageConfig;
use thiserror::Error;

/// Startup-time configuration faults. All of them are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid provider: {0} (expected \"openai\" or \"bedrock\")")]
    InvalidProvider(String),

    #[error("S3 storage selected but no bucket configured")]
    MissingBucket,

    #[error("model id cannot be empty for provider {0}")]
    EmptyModelId(String),

    #[error("Provider {0} is not compiled into this build")]
    ProviderUnavailable(String),

    #[error("Storage backend {0} is not compiled into this build")]
    StorageUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8005,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Source of the system prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptConfig {
    Text(String),
    File(std::path::PathBuf),
}

/// Complete, validated configuration for one process.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub prompt: PromptConfig,
}
