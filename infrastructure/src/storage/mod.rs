//! Session store adapters.

mod codec;
mod local;
#[cfg(feature = "s3")]
mod s3;

pub use local::LocalSessionStore;
#[cfg(feature = "s3")]
pub use s3::S3SessionStore;

use std::sync::Arc;
use tracing::info;
use twin_application::SessionStore;
use twin_domain::{ConfigError, StorageConfig};

/// Construct the configured session store. Called once at startup.
pub async fn build_session_store(
    config: &StorageConfig,
) -> Result<Arc<dyn SessionStore>, ConfigError> {
    match config {
        StorageConfig::Local { dir } => {
            info!(dir = %dir.display(), "Using local session storage");
            Ok(Arc::new(LocalSessionStore::new(dir.clone())))
        }
        #[cfg(feature = "s3")]
        StorageConfig::S3 { bucket, region } => {
            Ok(Arc::new(S3SessionStore::new(bucket.clone(), region.clone()).await))
        }
        #[cfg(not(feature = "s3"))]
        StorageConfig::S3 { .. } => Err(ConfigError::StorageUnavailable("S3".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builds_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = build_session_store(&StorageConfig::Local {
            dir: dir.path().to_path_buf(),
        })
        .await
        .unwrap();
        assert_eq!(store.backend(), "local");
    }
}
