//! Session storage configuration.

use std::path::PathBuf;

/// Where session records live, chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// One `<session_id>.json` file per session under `dir`.
    Local { dir: PathBuf },
    /// One `<session_id>.json` object per session in `bucket`.
    S3 { bucket: String, region: Option<String> },
}

impl StorageConfig {
    /// Short label used in status responses.
    pub fn label(&self) -> &'static str {
        match self {
            StorageConfig::Local { .. } => "local",
            StorageConfig::S3 { .. } => "S3",
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Local {
            dir: PathBuf::from("../memory"),
        }
    }
}
