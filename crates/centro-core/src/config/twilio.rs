//! Voice-platform credential configuration.
//!
//! Four opaque credential strings plus the caller-ID number, exactly the
//! set the hosted platform requires. All of them are required for token
//! minting; absence is reported at request time, never as a crash.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Twilio credential and caller-ID configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwilioConfig {
    /// Account SID (`AC…`).
    #[serde(default)]
    pub account_sid: String,
    /// API key SID (`SK…`) used as the token issuer.
    #[serde(default)]
    pub api_key: String,
    /// API key secret used to sign tokens.
    #[serde(default)]
    pub api_secret: String,
    /// TwiML application SID the outgoing grant is scoped to.
    #[serde(default)]
    pub twiml_app_sid: String,
    /// Platform phone number used as outbound caller ID.
    #[serde(default)]
    pub phone_number: String,
    /// Access-token validity window in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl TwilioConfig {
    /// Check that the four credentials needed for token minting are present.
    ///
    /// The error message is the one the token endpoint returns verbatim.
    pub fn validate_credentials(&self) -> Result<(), AppError> {
        if self.account_sid.is_empty()
            || self.api_key.is_empty()
            || self.api_secret.is_empty()
            || self.twiml_app_sid.is_empty()
        {
            return Err(AppError::configuration(
                "Missing Twilio credentials in environment variables",
            ));
        }
        Ok(())
    }

    /// Whether all credentials plus the caller-ID number are set.
    pub fn is_configured(&self) -> bool {
        self.validate_credentials().is_ok() && !self.phone_number.is_empty()
    }

    /// Apply the conventional `TWILIO_*` environment variables on top of
    /// whatever the config files provided. Empty variables are ignored.
    pub fn apply_env_overrides(&mut self) {
        let overrides = [
            ("TWILIO_ACCOUNT_SID", &mut self.account_sid),
            ("TWILIO_API_KEY", &mut self.api_key),
            ("TWILIO_API_SECRET", &mut self.api_secret),
            ("TWILIO_TWIML_APP_SID", &mut self.twiml_app_sid),
            ("TWILIO_PHONE_NUMBER", &mut self.phone_number),
        ];

        for (name, slot) in overrides {
            if let Ok(value) = std::env::var(name)
                && !value.trim().is_empty()
            {
                *slot = value;
            }
        }
    }
}

fn default_token_ttl() -> u64 {
    3600
}
