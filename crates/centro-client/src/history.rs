//! In-memory call history.
//!
//! Records are appended when a call is answered and finalized by call id
//! when it terminates. History lives and dies with the session; nothing
//! is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used for the local agent side of a call.
pub const AGENT_LABEL: &str = "Agent";

/// Which side initiated the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Inbound,
    Outbound,
}

impl CallDirection {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

/// Lifecycle status of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    /// Outbound leg is being set up.
    Connecting,
    /// Inbound leg is ringing.
    Ringing,
    /// The call was answered and is live.
    InProgress,
    /// The call ended.
    Completed,
}

impl CallStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connecting => "connecting",
            Self::Ringing => "ringing",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// One call, pending or remembered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: Uuid,
    pub direction: CallDirection,
    pub from: String,
    pub to: String,
    pub status: CallStatus,
    /// Final elapsed seconds; zero until the call completes.
    pub duration_secs: u64,
    pub started_at: DateTime<Utc>,
}

impl CallRecord {
    /// A ringing inbound call. A missing `To` parameter falls back to the
    /// agent label.
    pub fn inbound(from: Option<String>, to: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction: CallDirection::Inbound,
            from: from.unwrap_or_default(),
            to: to.unwrap_or_else(|| AGENT_LABEL.to_string()),
            status: CallStatus::Ringing,
            duration_secs: 0,
            started_at: Utc::now(),
        }
    }

    /// An outbound call being set up by the agent.
    pub fn outbound(to: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction: CallDirection::Outbound,
            from: AGENT_LABEL.to_string(),
            to: to.into(),
            status: CallStatus::Connecting,
            duration_secs: 0,
            started_at: Utc::now(),
        }
    }

    /// The party shown for this call: the caller for inbound, the callee
    /// for outbound.
    pub fn counterpart(&self) -> &str {
        match self.direction {
            CallDirection::Inbound => &self.from,
            CallDirection::Outbound => &self.to,
        }
    }
}

/// Session-scoped list of answered calls.
#[derive(Debug, Clone, Default)]
pub struct CallHistory {
    records: Vec<CallRecord>,
}

impl CallHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an answered call.
    pub fn push(&mut self, record: CallRecord) {
        self.records.push(record);
    }

    /// Marks the record with the given id completed, recording its final
    /// duration. Returns false when no record matches, which happens for
    /// calls that ended before they were answered.
    pub fn finalize(&mut self, id: Uuid, duration_secs: u64) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.status = CallStatus::Completed;
                record.duration_secs = duration_secs;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
