//! Session state machine for the single call slot.
//!
//! The lifecycle is linear with one loop:
//!
//! ```text
//! uninitialized -> registering -> ready -> call-pending -> in-call
//!                      |            ^                         |
//!                      v            +------ call-ended <------+
//!                    failed
//! ```
//!
//! `call-ended` returns to `ready` after a short settle delay, or leaves
//! early when a new call arrives. Presence is derived from the state,
//! never stored.

use serde::Serialize;

use crate::history::CallRecord;

/// Why a session never became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFailure {
    /// The token endpoint refused or could not be reached.
    TokenFetch,
    /// The device could not be set up with the fetched token.
    DeviceInit,
    /// The platform refused the registration.
    Registration,
}

/// Lifecycle state of the session's single call slot.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing has happened yet.
    Uninitialized,
    /// Token fetched or being fetched, registration in flight.
    Registering,
    /// Startup failed; the session is unusable until restarted.
    Failed { failure: SessionFailure },
    /// Registered, no call in the slot.
    Ready,
    /// A call occupies the slot but has not been answered.
    CallPending { call: CallRecord },
    /// A live answered call occupies the slot.
    InCall { call: CallRecord },
    /// The call just ended; the slot lingers before returning to ready.
    CallEnded,
}

/// Presence shown for the agent, derived from session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPresence {
    Available,
    Busy,
    Offline,
}

impl AgentPresence {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }
}

impl SessionState {
    /// Derives agent presence from the slot state.
    pub fn presence(&self) -> AgentPresence {
        match self {
            Self::Uninitialized | Self::Registering | Self::Failed { .. } => AgentPresence::Offline,
            Self::Ready | Self::CallEnded => AgentPresence::Available,
            Self::CallPending { .. } | Self::InCall { .. } => AgentPresence::Busy,
        }
    }

    /// Whether the slot is registered and free to take a new call.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Ready | Self::CallEnded)
    }

    /// The call occupying the slot, if any.
    pub fn active_call(&self) -> Option<&CallRecord> {
        match self {
            Self::CallPending { call } | Self::InCall { call } => Some(call),
            _ => None,
        }
    }
}

/// A transient condition worth showing in place of the steady status.
///
/// Cleared by the next lifecycle transition, mirroring last-writer-wins
/// status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionNotice {
    /// The device reported an error.
    DeviceError { message: String },
    /// An outbound call could not be placed.
    DialFailed,
}

/// Everything observers need to render the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Identity granted by the token endpoint, once known.
    pub identity: Option<String>,
    pub muted: bool,
    /// Live elapsed seconds of the answered call.
    pub duration_secs: u64,
    pub notice: Option<SessionNotice>,
    /// Last platform or token error message, cleared on registration.
    pub error: Option<String>,
    pub history: Vec<CallRecord>,
}

impl SessionSnapshot {
    /// The snapshot published before anything happens.
    pub fn initial() -> Self {
        Self {
            state: SessionState::Uninitialized,
            identity: None,
            muted: false,
            duration_secs: 0,
            notice: None,
            error: None,
            history: Vec::new(),
        }
    }

    /// Derived agent presence.
    pub fn presence(&self) -> AgentPresence {
        self.state.presence()
    }
}
