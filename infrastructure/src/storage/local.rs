//! Filesystem session store.
//!
//! Each session lives in `<dir>/<session_id>.json`. Writes go to a
//! uniquely named temp file in the same directory and are renamed over the
//! record, so readers only ever see a complete document.

use super::codec::{decode_history, encode_history};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use twin_application::{SessionStore, StoreError, StoreRecord};
use twin_domain::{Message, SessionId};

pub struct LocalSessionStore {
    dir: PathBuf,
}

impl LocalSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, session_id: &SessionId) -> PathBuf {
        self.dir.join(session_id.record_key())
    }
}

#[async_trait]
impl SessionStore for LocalSessionStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn read(&self, session_id: &SessionId) -> Result<StoreRecord, StoreError> {
        let path = self.record_path(session_id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(StoreRecord::Found(decode_history(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreRecord::NotFound),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    async fn write(&self, session_id: &SessionId, messages: &[Message]) -> Result<(), StoreError> {
        let body = encode_history(messages)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.record_path(session_id);
        let tmp_path = self.dir.join(format!(
            ".{}.{}.tmp",
            session_id.record_key(),
            uuid::Uuid::new_v4().simple()
        ));

        if let Err(e) = tokio::fs::write(&tmp_path, &body).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(format!("{}: {}", tmp_path.display(), e)));
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(format!("{}: {}", path.display(), e)));
        }

        debug!(path = %path.display(), messages = messages.len(), "Session record written");
        Ok(())
    }
}
