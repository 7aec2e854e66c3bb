//! Access-token issuance for softphone identities.

use centro_core::config::TwilioConfig;
use centro_core::error::{AppError, ErrorKind};
use centro_twilio::token::{AccessToken, VoiceGrant};

/// Identity granted when the caller does not name one.
pub const DEFAULT_IDENTITY: &str = "agent";

/// A freshly minted access token and the identity it is scoped to.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub identity: String,
}

/// Mints voice access tokens for one configured account.
#[derive(Debug, Clone)]
pub struct TokenService {
    /// Platform credentials and token policy.
    config: TwilioConfig,
}

impl TokenService {
    /// Creates a token service over the given platform configuration.
    pub fn new(config: TwilioConfig) -> Self {
        Self { config }
    }

    /// Issues a signed access token.
    ///
    /// A missing or empty identity resolves to [`DEFAULT_IDENTITY`]. The
    /// token allows incoming call delivery and scopes outgoing calls to
    /// the configured TwiML application.
    pub fn issue(&self, identity: Option<&str>) -> Result<IssuedToken, AppError> {
        self.config.validate_credentials()?;

        let identity = identity
            .filter(|identity| !identity.is_empty())
            .unwrap_or(DEFAULT_IDENTITY)
            .to_string();

        let token = AccessToken::new(
            &self.config.account_sid,
            &self.config.api_key,
            &self.config.api_secret,
        )
        .identity(&identity)
        .ttl_seconds(self.config.token_ttl_seconds)
        .voice_grant(
            VoiceGrant::new()
                .incoming_allow(true)
                .outgoing_application(&self.config.twiml_app_sid),
        )
        .to_jwt()
        .map_err(|e| AppError::with_source(ErrorKind::Token, "Failed to generate token", e))?;

        tracing::debug!(identity = %identity, "issued voice access token");

        Ok(IssuedToken { token, identity })
    }
}
