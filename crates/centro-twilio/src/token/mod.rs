//! Access-token construction.
//!
//! The platform authenticates softphone clients with short-lived JWTs
//! signed by an API key secret. The format is fixed by the platform
//! (`cty: twilio-fpa;v=1`, grants object carrying the identity and the
//! per-channel capability grants); tokens minted here are byte-compatible
//! with the ones the vendor SDKs produce.

mod builder;
mod claims;

pub use builder::{AccessToken, VoiceGrant};
pub use claims::{AccessTokenClaims, GrantsClaim, VoiceGrantClaim};
