//! Console view model.
//!
//! [`CallCenterView`] is the complete render input for the call-center
//! screen. Deriving it is side-effect free, so the same snapshot always
//! renders the same screen.

use serde::Serialize;

use centro_client::history::{CallDirection, CallRecord, CallStatus};
use centro_client::session::{AgentPresence, SessionSnapshot, SessionState};

use crate::status::status_line;

/// Shown when the history list is empty.
pub const EMPTY_HISTORY: &str = "No hay llamadas registradas";

/// Presence indicator next to the agent name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresenceBadge {
    pub label: &'static str,
    /// CSS color of the indicator dot.
    pub color: &'static str,
}

/// Badge for an agent presence value.
pub fn presence_badge(presence: AgentPresence) -> PresenceBadge {
    match presence {
        AgentPresence::Available => PresenceBadge {
            label: "Disponible",
            color: "#10b981",
        },
        AgentPresence::Busy => PresenceBadge {
            label: "En llamada",
            color: "#ef4444",
        },
        AgentPresence::Offline => PresenceBadge {
            label: "Desconectado",
            color: "#6b7280",
        },
    }
}

/// Formats elapsed seconds as zero-padded `MM:SS`. Minutes run past 59
/// for calls longer than an hour.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Which controls the screen offers for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// Dial input and call button.
    pub can_dial: bool,
    pub can_hang_up: bool,
    pub can_mute: bool,
    /// Credential setup instructions, shown while the agent is offline.
    pub show_setup_panel: bool,
}

impl Controls {
    fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let on_call = snapshot.state.active_call().is_some();
        Self {
            can_dial: snapshot.state.is_idle(),
            can_hang_up: on_call,
            can_mute: on_call,
            show_setup_panel: snapshot.presence() == AgentPresence::Offline,
        }
    }
}

/// One rendered history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Direction tag: `Entrante` or `Saliente`.
    pub direction: &'static str,
    /// The remote party.
    pub counterpart: String,
    /// Local start time, `HH:MM:SS`.
    pub started_at: String,
    /// Status chip: `Completada` or `En progreso`.
    pub status: &'static str,
    /// Final duration, only for completed calls.
    pub duration: Option<String>,
}

impl HistoryRow {
    fn from_record(record: &CallRecord) -> Self {
        let completed = record.status == CallStatus::Completed;
        Self {
            direction: match record.direction {
                CallDirection::Inbound => "Entrante",
                CallDirection::Outbound => "Saliente",
            },
            counterpart: record.counterpart().to_string(),
            started_at: record.started_at.format("%H:%M:%S").to_string(),
            status: if completed { "Completada" } else { "En progreso" },
            duration: completed.then(|| format_duration(record.duration_secs)),
        }
    }
}

/// Everything the call-center screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct CallCenterView {
    /// One-line session status.
    pub status: String,
    pub presence: PresenceBadge,
    /// Large stage banner: `CALL`, `READY` or `LOADING`.
    pub stage: &'static str,
    /// Live call clock, `MM:SS`.
    pub duration: String,
    pub muted: bool,
    /// Identity granted by the token endpoint, once known.
    pub identity: Option<String>,
    pub controls: Controls,
    /// History entries in answer order.
    pub history: Vec<HistoryRow>,
}

impl CallCenterView {
    /// Derives the full view from a session snapshot.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            status: status_line(snapshot),
            presence: presence_badge(snapshot.presence()),
            stage: stage_banner(&snapshot.state),
            duration: format_duration(snapshot.duration_secs),
            muted: snapshot.muted,
            identity: snapshot.identity.clone(),
            controls: Controls::from_snapshot(snapshot),
            history: snapshot.history.iter().map(HistoryRow::from_record).collect(),
        }
    }
}

/// The big center banner.
pub fn stage_banner(state: &SessionState) -> &'static str {
    match state {
        SessionState::CallPending { .. } | SessionState::InCall { .. } => "CALL",
        SessionState::Ready | SessionState::CallEnded => "READY",
        SessionState::Uninitialized | SessionState::Registering | SessionState::Failed { .. } => {
            "LOADING"
        }
    }
}
