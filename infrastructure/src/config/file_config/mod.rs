//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! (and the environment overlay). They are converted once into the
//! immutable domain [`ServiceConfig`].

mod prompt;
mod providers;
mod server;
mod storage;

pub use prompt::FilePromptConfig;
pub use providers::{FileBedrockConfig, FileOpenAiConfig, FileProviderConfig};
pub use server::FileServerConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use twin_domain::{ConfigError, ServiceConfig};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider selection and credentials
    pub provider: FileProviderConfig,
    /// Session storage backend
    pub storage: FileStorageConfig,
    /// HTTP listener and CORS
    pub server: FileServerConfig,
    /// System prompt source
    pub prompt: FilePromptConfig,
}

impl FileConfig {
    /// Validate and convert into the service configuration.
    ///
    /// Any error here is fatal: the process must not start serving.
    pub fn into_service_config(self) -> Result<ServiceConfig, ConfigError> {
        Ok(ServiceConfig {
            provider: self.provider.resolve()?,
            storage: self.storage.resolve()?,
            server: self.server.resolve()?,
            prompt: self.prompt.resolve(),
        })
    }
}
