//! Configuration loading for digital-twin
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TWIN_*` environment variables, then the legacy flat variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./twin.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/digital-twin/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBedrockConfig, FileConfig, FileOpenAiConfig, FilePromptConfig, FileProviderConfig,
    FileServerConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
