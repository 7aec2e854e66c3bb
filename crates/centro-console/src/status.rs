//! Status line derivation.
//!
//! One line of Spanish text summarizing the session, exactly as the
//! agents know it. A transient notice takes precedence over the steady
//! state; the controller clears notices on the next lifecycle
//! transition, so precedence here never hides a state change for long.

use centro_client::history::{CallDirection, CallRecord};
use centro_client::session::{SessionFailure, SessionNotice, SessionSnapshot, SessionState};

pub const STATUS_STARTING: &str = "Iniciando...";
pub const STATUS_READY: &str = "Listo para recibir llamadas";
pub const STATUS_IN_CALL: &str = "EN LLAMADA";
pub const STATUS_CALL_ENDED: &str = "Llamada finalizada";
pub const STATUS_DIAL_FAILED: &str = "Error al realizar llamada";
pub const STATUS_MISSING_CONFIG: &str = "Error: Configuración de Twilio requerida";
pub const STATUS_INIT_FAILED: &str = "Error al inicializar";

/// The status line for a session snapshot.
pub fn status_line(snapshot: &SessionSnapshot) -> String {
    if let Some(notice) = &snapshot.notice {
        return match notice {
            SessionNotice::DeviceError { message } => format!("Error: {message}"),
            SessionNotice::DialFailed => STATUS_DIAL_FAILED.to_string(),
        };
    }

    match &snapshot.state {
        SessionState::Uninitialized | SessionState::Registering => STATUS_STARTING.to_string(),
        SessionState::Failed { failure } => failure_line(*failure, snapshot.error.as_deref()),
        SessionState::Ready => STATUS_READY.to_string(),
        SessionState::CallPending { call } => pending_line(call),
        SessionState::InCall { .. } => STATUS_IN_CALL.to_string(),
        SessionState::CallEnded => STATUS_CALL_ENDED.to_string(),
    }
}

fn failure_line(failure: SessionFailure, error: Option<&str>) -> String {
    match failure {
        SessionFailure::TokenFetch => STATUS_MISSING_CONFIG.to_string(),
        SessionFailure::DeviceInit => STATUS_INIT_FAILED.to_string(),
        SessionFailure::Registration => match error {
            Some(message) => format!("Error: {message}"),
            None => STATUS_INIT_FAILED.to_string(),
        },
    }
}

fn pending_line(call: &CallRecord) -> String {
    match call.direction {
        CallDirection::Inbound => format!("LLAMADA ENTRANTE de {}", call.from),
        CallDirection::Outbound => format!("Llamando a {}...", call.to),
    }
}
