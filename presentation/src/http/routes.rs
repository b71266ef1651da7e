//! Route definitions for the chat API.

use super::dto::{
    ChatRequest, ChatResponse, ConversationResponse, HealthResponse, ServiceStatus,
};
use super::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use twin_application::{ChatInput, ConverseUseCase};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub converse: Arc<ConverseUseCase>,
}

impl AppState {
    pub fn new(converse: ConverseUseCase) -> Self {
        Self {
            converse: Arc::new(converse),
        }
    }
}

/// Build the complete router with all routes.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/conversation/:session_id", get(conversation_handler))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn root_handler(State(state): State<AppState>) -> Json<ServiceStatus> {
    let provider = state.converse.provider();
    Json(ServiceStatus {
        message: "AI Digital Twin API".to_string(),
        memory_enabled: true,
        storage: state.converse.store().backend().to_string(),
        model_use: provider.kind().to_string(),
        model_id: provider.model_id().to_string(),
    })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.converse.provider();
    Json(HealthResponse {
        status: "healthy".to_string(),
        use_s3: state.converse.store().backend() == "S3",
        model_use: provider.kind().to_string(),
        model_id: provider.model_id().to_string(),
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let input = ChatInput {
        message: request.message,
        session_id: request.session_id,
    };
    let output = state.converse.handle(input).await?;
    Ok(Json(ChatResponse {
        response: output.reply,
        session_id: output.session_id.to_string(),
    }))
}

async fn conversation_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let messages = state.converse.fetch(&session_id).await?;
    Ok(Json(ConversationResponse {
        session_id,
        messages,
    }))
}
