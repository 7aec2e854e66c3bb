//! # centro-twilio
//!
//! The Twilio-facing surface of Centro. Everything the hosted platform
//! sees or hands us crosses this crate:
//!
//! - `token`: capability access tokens (HS256 JWTs in the platform's
//!   first-person-auth format) granting an identity permission to place
//!   and receive calls
//! - `twiml`: declarative call-control documents returned from the voice
//!   webhook
//! - `webhook`: the form-encoded callback parameter set the platform
//!   posts to us
//!
//! No network I/O happens here; this crate only builds and parses the
//! wire formats.

pub mod token;
pub mod twiml;
pub mod webhook;

pub use token::{AccessToken, AccessTokenClaims, VoiceGrant};
pub use twiml::{Dial, DialTarget, VoiceResponse};
pub use webhook::VoiceCallbackParams;
