//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use centro_core::config::AppConfig;
use centro_service::token::TokenService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Access-token issuance service
    pub token_service: Arc<TokenService>,
}

impl AppState {
    /// Builds the state from a loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        let token_service = Arc::new(TokenService::new(config.twilio.clone()));
        Self {
            config: Arc::new(config),
            token_service,
        }
    }
}
