//! # centro-client
//!
//! The agent-side softphone session. A [`controller::CallController`]
//! owns a single call slot and drives it from device events, user
//! commands, and timers on one event loop with no shared locks. The
//! softphone transport itself sits behind the [`device::VoiceDevice`]
//! trait; [`device::SimulatedDevice`] is the in-process implementation
//! used by tests and local development.
//!
//! Consumers observe the session through a watch channel of
//! [`session::SessionSnapshot`] values and never touch controller
//! internals directly.

pub mod controller;
pub mod device;
pub mod history;
pub mod session;
pub mod token_source;

pub use controller::{CallController, ControllerHandle};
pub use device::{
    CallHandle, CallParameters, DeviceEvent, DeviceOptions, SimulatedCall, SimulatedDevice,
    VoiceDevice,
};
pub use history::{CallDirection, CallHistory, CallRecord, CallStatus};
pub use session::{AgentPresence, SessionFailure, SessionNotice, SessionSnapshot, SessionState};
pub use token_source::{FetchedToken, HttpTokenSource, StaticTokenSource, TokenSource};
