//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use twin_domain::{ConfigError, ServerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated list of allowed CORS origins.
    pub cors_origins: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8005,
            cors_origins: "http://localhost:3000".to_string(),
        }
    }
}

impl FileServerConfig {
    pub fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let cors_origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host cannot be empty".to_string()));
        }
        Ok(ServerConfig {
            host: self.host.trim().to_string(),
            port: self.port,
            cors_origins,
        })
    }
}
