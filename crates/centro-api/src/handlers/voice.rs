//! Voice webhook handler.

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use centro_service::voice::{apology_document, render_decision, route_call};
use centro_twilio::webhook::VoiceCallbackParams;

use crate::state::AppState;

/// POST /voice
///
/// Answers a platform voice callback with a call-control document.
/// Every failure path, from an unparseable body to a rendering error,
/// returns the spoken apology document with status 500; the caller
/// always hears something.
pub async fn voice_webhook(
    State(state): State<AppState>,
    params: Result<Form<VoiceCallbackParams>, FormRejection>,
) -> Response {
    let params = match params {
        Ok(Form(params)) => params,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable voice callback");
            return apology();
        }
    };

    let decision = route_call(&params);
    tracing::info!(
        call_sid = params.call_sid.as_deref().unwrap_or(""),
        decision = ?decision,
        "routing voice callback"
    );

    match render_decision(&decision, &state.config.twilio) {
        Ok(document) => xml_response(StatusCode::OK, document),
        Err(err) => {
            tracing::error!(error = %err, "voice document rendering failed");
            apology()
        }
    }
}

fn apology() -> Response {
    xml_response(StatusCode::INTERNAL_SERVER_ERROR, apology_document())
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "text/xml")], body).into_response()
}
