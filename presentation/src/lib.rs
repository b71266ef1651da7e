//! Presentation layer for digital-twin
//!
//! This crate contains the HTTP API and the CLI definition.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{AppState, build_router};
