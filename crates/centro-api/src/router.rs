//! Route definitions for the Centro HTTP surface.
//!
//! Two wire endpoints (`/token`, `/voice`), the browser pages, and a
//! health probe. The router receives `AppState` and passes it to all
//! handlers via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(token_routes())
        .merge(voice_routes())
        .merge(page_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Access-token endpoint
fn token_routes() -> Router<AppState> {
    Router::new().route("/token", post(handlers::token::mint_token))
}

/// Platform voice webhook
fn voice_routes() -> Router<AppState> {
    Router::new().route("/voice", post(handlers::voice::voice_webhook))
}

/// Browser pages
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/about", get(handlers::pages::about))
        .route("/screener/calls", get(handlers::pages::call_center))
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
