//! Softphone client configuration.

use serde::{Deserialize, Serialize};

/// Agent-side softphone settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Calling identity the client requests tokens for.
    #[serde(default = "default_identity")]
    pub identity: String,
    /// Token endpoint URL the client fetches its credential from.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Delay before an incoming call is answered automatically, in
    /// milliseconds. Zero answers immediately.
    #[serde(default = "default_answer_delay")]
    pub answer_delay_ms: u64,
    /// How long the session lingers in the call-ended state before
    /// returning to ready, in seconds.
    #[serde(default = "default_post_call_settle")]
    pub post_call_settle_seconds: u64,
    /// How long before token expiry a fresh token is requested, in seconds.
    #[serde(default = "default_refresh_margin")]
    pub token_refresh_margin_seconds: u64,
    /// Preferred audio codecs, in priority order.
    #[serde(default = "default_codec_preferences")]
    pub codec_preferences: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            token_url: default_token_url(),
            answer_delay_ms: default_answer_delay(),
            post_call_settle_seconds: default_post_call_settle(),
            token_refresh_margin_seconds: default_refresh_margin(),
            codec_preferences: default_codec_preferences(),
        }
    }
}

fn default_identity() -> String {
    "agent".to_string()
}

fn default_token_url() -> String {
    "http://127.0.0.1:8080/token".to_string()
}

fn default_answer_delay() -> u64 {
    500
}

fn default_post_call_settle() -> u64 {
    2
}

fn default_refresh_margin() -> u64 {
    300
}

fn default_codec_preferences() -> Vec<String> {
    vec!["opus".to_string(), "pcmu".to_string()]
}
