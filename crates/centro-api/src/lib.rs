//! # centro-api
//!
//! HTTP layer for Centro built on Axum.
//!
//! Exposes the token-minting endpoint, the voice webhook, the browser
//! page routes, and a health probe, plus the CORS/logging middleware
//! and the `AppError` to HTTP mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
