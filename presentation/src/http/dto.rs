//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use twin_domain::Message;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Reply to `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Reply to `GET /conversation/:session_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
}

/// Reply to `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub memory_enabled: bool,
    pub storage: String,
    pub model_use: String,
    pub model_id: String,
}

/// Reply to `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub use_s3: bool,
    pub model_use: String,
    pub model_id: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
