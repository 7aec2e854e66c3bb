//! JWT claims structure embedded in every access token.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use centro_core::error::AppError;

/// Claims payload of a platform access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Token ID: the signing key SID plus the issue timestamp.
    pub jti: String,
    /// Issuer, the API key SID the token was signed with.
    pub iss: String,
    /// Subject, the account SID the grants apply to.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Capability grants.
    pub grants: GrantsClaim,
}

/// The grants object carried inside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantsClaim {
    /// Calling identity the token is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Voice capability grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceGrantClaim>,
}

/// Voice grant payload: inbound delivery plus outbound application scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceGrantClaim {
    /// Inbound call delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming: Option<IncomingClaim>,
    /// Outbound call initiation, scoped to one application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing: Option<OutgoingClaim>,
}

/// Inbound portion of a voice grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingClaim {
    /// Whether inbound calls may be delivered to this identity.
    pub allow: bool,
}

/// Outbound portion of a voice grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingClaim {
    /// TwiML application invoked for outbound calls.
    pub application_sid: String,
}

impl AccessTokenClaims {
    /// Read the claims out of a serialized token without verifying the
    /// signature.
    ///
    /// The client holds its own token but not the signing secret; this is
    /// how it learns the expiry to schedule a refresh. Never use this for
    /// trust decisions.
    pub fn peek(jwt: &str) -> Result<Self, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let data = decode::<Self>(jwt, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| AppError::with_source(
                centro_core::error::ErrorKind::Token,
                format!("Failed to read token claims: {e}"),
                e,
            ))?;

        Ok(data.claims)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Returns the identity the token is scoped to, if any.
    pub fn identity(&self) -> Option<&str> {
        self.grants.identity.as_deref()
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
