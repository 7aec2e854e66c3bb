//! Call routing for voice webhooks.
//!
//! [`route_call`] is a pure function from webhook parameters to a typed
//! [`RouteDecision`]; [`render_decision`] turns a decision into a TwiML
//! document. HTTP status mapping and the apology fallback live in the API
//! layer, which calls [`apology_document`] when either step fails.

use centro_core::config::TwilioConfig;
use centro_core::error::AppError;
use centro_twilio::twiml::{Dial, VoiceResponse};
use centro_twilio::webhook::VoiceCallbackParams;

/// Reserved destination prefix naming a registered softphone client.
pub const CLIENT_PREFIX: &str = "client:";

/// Identity that answers inbound calls.
pub const INBOUND_AGENT: &str = "agent";

/// Greeting spoken to inbound callers while they are connected.
pub const INBOUND_GREETING: &str =
    "Bienvenido al centro de llamadas. Por favor espere mientras lo conectamos con un agente.";

/// Apology spoken when call handling fails.
pub const ROUTING_APOLOGY: &str =
    "Lo sentimos, ha ocurrido un error. Por favor intente más tarde.";

/// Typed outcome of routing one voice callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Connect the leg to a registered softphone client.
    DialClient { identity: String },
    /// Connect the leg to a dialable number.
    DialNumber { number: String },
    /// No destination given: greet the inbound caller, then ring the agent.
    Greet,
}

/// Decides how to connect a call leg.
///
/// A destination starting with [`CLIENT_PREFIX`] names a softphone client
/// (prefix stripped); any other non-empty destination is dialed as a
/// number; no destination means the leg is an inbound call for the agent.
pub fn route_call(params: &VoiceCallbackParams) -> RouteDecision {
    match params.destination() {
        Some(to) => match to.strip_prefix(CLIENT_PREFIX) {
            Some(identity) => RouteDecision::DialClient {
                identity: identity.to_string(),
            },
            None => RouteDecision::DialNumber {
                number: to.to_string(),
            },
        },
        None => RouteDecision::Greet,
    }
}

/// Renders a routing decision to a call-control document.
///
/// Outbound legs carry the configured caller ID when one is set. Values
/// that cannot be represented in XML at all fail here; the caller answers
/// with [`apology_document`] in that case.
pub fn render_decision(
    decision: &RouteDecision,
    config: &TwilioConfig,
) -> Result<String, AppError> {
    let response = match decision {
        RouteDecision::DialClient { identity } => {
            ensure_xml_representable(identity)?;
            VoiceResponse::new().dial(with_caller_id(Dial::client(identity), config))
        }
        RouteDecision::DialNumber { number } => {
            ensure_xml_representable(number)?;
            VoiceResponse::new().dial(with_caller_id(Dial::number(number), config))
        }
        RouteDecision::Greet => VoiceResponse::new()
            .say(INBOUND_GREETING)
            .dial(Dial::client(INBOUND_AGENT)),
    };
    Ok(response.to_xml())
}

/// The fallback document spoken when routing or rendering fails.
pub fn apology_document() -> String {
    VoiceResponse::new().say(ROUTING_APOLOGY).to_xml()
}

fn with_caller_id(dial: Dial, config: &TwilioConfig) -> Dial {
    if config.phone_number.is_empty() {
        dial
    } else {
        dial.caller_id(&config.phone_number)
    }
}

/// XML 1.0 cannot carry most C0 control characters, escaped or not.
fn ensure_xml_representable(value: &str) -> Result<(), AppError> {
    if value
        .chars()
        .any(|ch| ch.is_control() && !matches!(ch, '\t' | '\n' | '\r'))
    {
        return Err(AppError::routing(
            "Destination contains characters that cannot be rendered",
        ));
    }
    Ok(())
}
