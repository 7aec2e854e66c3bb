//! Access-token builder with platform-compatible signing.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use centro_core::error::{AppError, ErrorKind};

use super::claims::{
    AccessTokenClaims, GrantsClaim, IncomingClaim, OutgoingClaim, VoiceGrantClaim,
};

/// Content-type header value that marks a first-person-auth token.
const TOKEN_CTY: &str = "twilio-fpa;v=1";

/// Builds signed access tokens for one account / API key pair.
///
/// Mirrors the vendor SDK's `AccessToken`: construct with the account
/// credentials, attach an identity and a grant, then serialize with
/// [`AccessToken::to_jwt`].
#[derive(Debug, Clone)]
pub struct AccessToken {
    account_sid: String,
    api_key: String,
    api_secret: String,
    identity: Option<String>,
    ttl_seconds: u64,
    voice_grant: Option<VoiceGrant>,
}

/// Voice capability grant attached to an access token.
#[derive(Debug, Clone, Default)]
pub struct VoiceGrant {
    incoming_allow: bool,
    outgoing_application_sid: Option<String>,
}

impl VoiceGrant {
    /// Creates an empty voice grant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit inbound call delivery to the token's identity.
    pub fn incoming_allow(mut self, allow: bool) -> Self {
        self.incoming_allow = allow;
        self
    }

    /// Scope outbound call initiation to the given TwiML application.
    pub fn outgoing_application(mut self, application_sid: impl Into<String>) -> Self {
        self.outgoing_application_sid = Some(application_sid.into());
        self
    }

    fn to_claim(&self) -> VoiceGrantClaim {
        VoiceGrantClaim {
            incoming: self.incoming_allow.then_some(IncomingClaim { allow: true }),
            outgoing: self
                .outgoing_application_sid
                .as_ref()
                .map(|sid| OutgoingClaim {
                    application_sid: sid.clone(),
                }),
        }
    }
}

impl AccessToken {
    /// Creates a token builder for the given credentials.
    pub fn new(
        account_sid: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            identity: None,
            ttl_seconds: 3600,
            voice_grant: None,
        }
    }

    /// Sets the calling identity the token is scoped to.
    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Sets the validity window. Defaults to one hour.
    pub fn ttl_seconds(mut self, ttl: u64) -> Self {
        self.ttl_seconds = ttl;
        self
    }

    /// Attaches a voice grant.
    pub fn voice_grant(mut self, grant: VoiceGrant) -> Self {
        self.voice_grant = Some(grant);
        self
    }

    /// Serializes and signs the token.
    pub fn to_jwt(&self) -> Result<String, AppError> {
        let now = Utc::now();
        let iat = now.timestamp();

        let claims = AccessTokenClaims {
            jti: format!("{}-{}", self.api_key, iat),
            iss: self.api_key.clone(),
            sub: self.account_sid.clone(),
            iat,
            exp: iat + self.ttl_seconds as i64,
            grants: GrantsClaim {
                identity: self.identity.clone(),
                voice: self.voice_grant.as_ref().map(VoiceGrant::to_claim),
            },
        };

        let mut header = Header::default();
        header.cty = Some(TOKEN_CTY.to_string());

        encode(&header, &claims, &EncodingKey::from_secret(self.api_secret.as_bytes())).map_err(
            |e| {
                AppError::with_source(
                    ErrorKind::Token,
                    format!("Failed to encode access token: {e}"),
                    e,
                )
            },
        )
    }
}
