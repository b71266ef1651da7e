//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Deserializer, Serialize, de};
use std::path::PathBuf;
use twin_domain::{ConfigError, StorageConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Store sessions in S3 instead of the local filesystem.
    #[serde(deserialize_with = "deserialize_flag")]
    pub use_s3: bool,
    /// Bucket holding `<session_id>.json` objects.
    pub s3_bucket: String,
    /// Region for the S3 client; the AWS default chain applies when unset.
    pub s3_region: Option<String>,
    /// Directory holding `<session_id>.json` files.
    pub memory_dir: PathBuf,
}

/// Accept a boolean, or `"true"`/`"false"` in any letter case.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(de::Error::invalid_value(
                de::Unexpected::Str(&text),
                &"true or false",
            )),
        },
    }
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            use_s3: false,
            s3_bucket: String::new(),
            s3_region: None,
            memory_dir: PathBuf::from("../memory"),
        }
    }
}

impl FileStorageConfig {
    pub fn resolve(&self) -> Result<StorageConfig, ConfigError> {
        if !self.use_s3 {
            return Ok(StorageConfig::Local {
                dir: self.memory_dir.clone(),
            });
        }
        if self.s3_bucket.trim().is_empty() {
            return Err(ConfigError::MissingBucket);
        }
        Ok(StorageConfig::S3 {
            bucket: self.s3_bucket.trim().to_string(),
            region: self.s3_region.clone(),
        })
    }
}
