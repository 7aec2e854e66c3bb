//! Softphone device abstraction.
//!
//! The trait surface mirrors the vendor voice SDK: a device registers
//! with an access token and hands out call handles; both push their
//! lifecycle notifications as [`DeviceEvent`]s into the channel created
//! alongside the device. Nothing here touches media; transport is the
//! implementation's concern.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use centro_core::config::ClientConfig;
use centro_core::error::AppError;

pub mod simulated;

pub use simulated::{SimulatedCall, SimulatedDevice};

/// Construction-time device options.
#[derive(Debug, Clone, Default)]
pub struct DeviceOptions {
    /// Preferred audio codecs, in priority order.
    pub codec_preferences: Vec<String>,
}

impl DeviceOptions {
    /// Derives device options from the client configuration.
    pub fn from_client_config(config: &ClientConfig) -> Self {
        Self {
            codec_preferences: config.codec_preferences.clone(),
        }
    }
}

/// Remote-party parameters delivered with a call leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParameters {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Notifications a device pushes to its session controller.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// The device registered and can receive calls.
    Registered,
    /// The platform refused the registration.
    RegistrationFailed { message: String },
    /// An inbound call is ringing.
    Incoming { call: Arc<dyn CallHandle> },
    /// A call leg was answered, locally or by the remote party.
    CallAccepted { call_sid: String },
    /// A call leg ended.
    CallDisconnected { call_sid: String },
    /// A ringing inbound call was abandoned by the caller.
    CallCanceled { call_sid: String },
    /// A ringing inbound call was refused locally.
    CallRejected { call_sid: String },
    /// The device reported an error outside any call lifecycle.
    Error { message: String },
}

/// Handle to one call leg.
#[async_trait]
pub trait CallHandle: fmt::Debug + Send + Sync {
    /// Platform identifier for this leg.
    fn sid(&self) -> &str;

    /// Parameters describing the remote side.
    fn parameters(&self) -> CallParameters;

    /// Answers a ringing inbound call.
    async fn accept(&self) -> Result<(), AppError>;

    /// Refuses a ringing inbound call.
    async fn reject(&self) -> Result<(), AppError>;

    /// Hangs up the leg.
    async fn disconnect(&self) -> Result<(), AppError>;

    /// Mutes or unmutes the local audio.
    async fn set_muted(&self, muted: bool) -> Result<(), AppError>;

    /// Current mute state.
    fn is_muted(&self) -> bool;
}

/// A softphone endpoint.
///
/// Registration makes the endpoint reachable for inbound calls;
/// [`VoiceDevice::connect`] starts outbound ones. Events for every leg
/// arrive on the channel created with the device, including legs started
/// through `connect`.
#[async_trait]
pub trait VoiceDevice: fmt::Debug + Send + Sync {
    /// Registers with the platform using the given access token.
    async fn register(&self, token: &str) -> Result<(), AppError>;

    /// Replaces the access token without dropping registration.
    async fn update_token(&self, token: &str) -> Result<(), AppError>;

    /// Starts an outbound call to the given destination.
    async fn connect(&self, to: &str) -> Result<Arc<dyn CallHandle>, AppError>;

    /// Tears down registration and releases the endpoint.
    async fn destroy(&self) -> Result<(), AppError>;
}
