//! HTTP API.
//!
//! Thin axum surface over [`twin_application::ConverseUseCase`]:
//! request decoding, CORS and error-to-status mapping only.

pub mod dto;
pub mod error;
pub mod routes;

pub use routes::{AppState, build_router};
