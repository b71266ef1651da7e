//! S3 session store.
//!
//! Each session is a `<session_id>.json` object in the configured bucket.
//! Every save is a full-object put; there is no conditional write, so the
//! last writer wins.

use super::codec::{decode_history, encode_history};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use std::sync::Arc;
use tracing::{debug, info};
use twin_application::{SessionStore, StoreError, StoreRecord};
use twin_domain::{Message, SessionId};

pub struct S3SessionStore {
    client: Arc<S3Client>,
    bucket: String,
}

impl S3SessionStore {
    /// Create a store using the default AWS credential chain.
    pub async fn new(bucket: impl Into<String>, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let aws_config = loader.load().await;
        let store = Self::with_client(S3Client::new(&aws_config), bucket);
        info!(bucket = %store.bucket, "S3 session store initialized");
        store
    }

    pub fn with_client(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// A missing key means "no conversation yet", not a fault.
fn is_missing_key(err: &GetObjectError) -> bool {
    err.is_no_such_key() || err.code() == Some("NoSuchKey")
}

#[async_trait]
impl SessionStore for S3SessionStore {
    fn backend(&self) -> &'static str {
        "S3"
    }

    async fn read(&self, session_id: &SessionId) -> Result<StoreRecord, StoreError> {
        let key = session_id.record_key();
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) if err.as_service_error().is_some_and(is_missing_key) => {
                return Ok(StoreRecord::NotFound);
            }
            Err(err) => {
                return Err(StoreError::Backend(format!(
                    "get s3://{}/{}: {}",
                    self.bucket,
                    key,
                    DisplayErrorContext(&err)
                )));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Backend(format!("read s3://{}/{}: {}", self.bucket, key, e)))?
            .into_bytes();

        Ok(StoreRecord::Found(decode_history(&bytes)?))
    }

    async fn write(&self, session_id: &SessionId, messages: &[Message]) -> Result<(), StoreError> {
        let key = session_id.record_key();
        let body = encode_history(messages)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| {
                StoreError::Backend(format!(
                    "put s3://{}/{}: {}",
                    self.bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(bucket = %self.bucket, key = %key, messages = messages.len(), "Session object written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{
        BehaviorVersion, Credentials, Region, RequestChecksumCalculation,
        ResponseChecksumValidation,
    };
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::types::error::{InvalidObjectState, NoSuchKey};
    use axum::{
        Router,
        body::Bytes,
        extract::{Path, State},
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
        routing::get,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;
    use twin_domain::Role;

    /// Bucket name for which the fake answers every request with AccessDenied.
    const LOCKED_BUCKET: &str = "locked";

    struct StoredObject {
        body: Vec<u8>,
        content_type: Option<String>,
    }

    /// Path-style S3 stand-in holding objects keyed by `<bucket>/<key>`.
    #[derive(Default)]
    struct FakeS3 {
        objects: Mutex<HashMap<String, StoredObject>>,
    }

    impl FakeS3 {
        fn seed(&self, bucket: &str, key: &str, body: &[u8]) {
            self.objects.lock().unwrap().insert(
                format!("{bucket}/{key}"),
                StoredObject {
                    body: body.to_vec(),
                    content_type: None,
                },
            );
        }
    }

    fn s3_error(status: StatusCode, code: &str) -> Response {
        let body = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Error><Code>{code}</Code><Message>{code}</Message><RequestId>test</RequestId></Error>"
        );
        (status, [(header::CONTENT_TYPE, "application/xml")], body).into_response()
    }

    async fn get_object(
        State(fake): State<Arc<FakeS3>>,
        Path((bucket, key)): Path<(String, String)>,
    ) -> Response {
        if bucket == LOCKED_BUCKET {
            return s3_error(StatusCode::FORBIDDEN, "AccessDenied");
        }
        let objects = fake.objects.lock().unwrap();
        match objects.get(&format!("{bucket}/{key}")) {
            Some(object) => (StatusCode::OK, object.body.clone()).into_response(),
            None => s3_error(StatusCode::NOT_FOUND, "NoSuchKey"),
        }
    }

    async fn put_object(
        State(fake): State<Arc<FakeS3>>,
        Path((bucket, key)): Path<(String, String)>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        if bucket == LOCKED_BUCKET {
            return s3_error(StatusCode::FORBIDDEN, "AccessDenied");
        }
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        fake.objects.lock().unwrap().insert(
            format!("{bucket}/{key}"),
            StoredObject {
                body: body.to_vec(),
                content_type,
            },
        );
        StatusCode::OK.into_response()
    }

    async fn spawn_fake(fake: Arc<FakeS3>) -> String {
        let app = Router::new()
            .route("/:bucket/:key", get(get_object).put(put_object))
            .with_state(fake);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn store_for(endpoint: String, bucket: &str) -> S3SessionStore {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(endpoint)
            .force_path_style(true)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();
        S3SessionStore::with_client(S3Client::from_conf(config), bucket)
    }

    fn sid(raw: &str) -> SessionId {
        SessionId::parse(raw).unwrap()
    }

    fn turn() -> Vec<Message> {
        vec![
            Message::with_timestamp(Role::User, "hi", "2024-01-01T00:00:00+00:00"),
            Message::with_timestamp(Role::Assistant, "hello", "2024-01-01T00:00:01+00:00"),
        ]
    }

    #[test]
    fn test_no_such_key_variant_is_missing() {
        let err = GetObjectError::NoSuchKey(NoSuchKey::builder().build());
        assert!(is_missing_key(&err));
    }

    #[test]
    fn test_no_such_key_code_is_missing() {
        let err = GetObjectError::generic(ErrorMetadata::builder().code("NoSuchKey").build());
        assert!(is_missing_key(&err));
    }

    #[test]
    fn test_other_faults_are_not_missing() {
        let denied = GetObjectError::generic(ErrorMetadata::builder().code("AccessDenied").build());
        let archived = GetObjectError::InvalidObjectState(InvalidObjectState::builder().build());
        assert!(!is_missing_key(&denied));
        assert!(!is_missing_key(&archived));
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let store = store_for(spawn_fake(Arc::default()).await, "twin-memory");

        let record = store.read(&sid("s1")).await.unwrap();
        assert_eq!(record, StoreRecord::NotFound);
        assert!(store.load(&sid("s1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let fake = Arc::new(FakeS3::default());
        let store = store_for(spawn_fake(fake.clone()).await, "twin-memory");
        let messages = turn();

        store.save(&sid("s1"), &messages).await.unwrap();

        {
            let objects = fake.objects.lock().unwrap();
            let object = objects.get("twin-memory/s1.json").unwrap();
            assert_eq!(object.content_type.as_deref(), Some("application/json"));
            assert!(String::from_utf8_lossy(&object.body).starts_with("[\n  {"));
        }
        assert_eq!(store.load(&sid("s1")).await.unwrap(), messages);
        assert_eq!(store.load(&sid("s1")).await.unwrap(), messages);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_object() {
        let fake = Arc::new(FakeS3::default());
        let store = store_for(spawn_fake(fake.clone()).await, "twin-memory");

        store.save(&sid("s1"), &turn()).await.unwrap();
        store.save(&sid("s1"), &turn()[..1]).await.unwrap();

        assert_eq!(store.load(&sid("s1")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_denied_read_is_backend_fault() {
        let store = store_for(spawn_fake(Arc::default()).await, LOCKED_BUCKET);

        let err = store.read(&sid("s1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(ref m) if m.contains("locked/s1.json")));
    }

    #[tokio::test]
    async fn test_denied_write_is_backend_fault() {
        let store = store_for(spawn_fake(Arc::default()).await, LOCKED_BUCKET);

        let err = store.save(&sid("s1"), &turn()).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(ref m) if m.contains("put s3://locked/s1.json")));
    }

    #[tokio::test]
    async fn test_corrupt_object_is_serialization_fault() {
        let fake = Arc::new(FakeS3::default());
        fake.seed("twin-memory", "s1.json", b"{not json");
        let store = store_for(spawn_fake(fake).await, "twin-memory");

        let err = store.read(&sid("s1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
