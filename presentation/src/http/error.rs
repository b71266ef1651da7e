//! Mapping of use case failures onto HTTP responses.

use super::dto::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use twin_application::{ConverseError, ErrorCategory};

/// A failed request, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub ConverseError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::ClientInput => StatusCode::BAD_REQUEST,
            ErrorCategory::Permission => StatusCode::FORBIDDEN,
            ErrorCategory::Upstream | ErrorCategory::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ConverseError> for ApiError {
    fn from(err: ConverseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
