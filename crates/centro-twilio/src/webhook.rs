//! Voice webhook request parameters.

use serde::Deserialize;

/// Form parameters posted by the telephony platform on each call event.
///
/// The platform sends many more fields than these; only the ones routing
/// cares about are captured and everything is optional so that a sparse
/// or unfamiliar callback still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VoiceCallbackParams {
    pub to: Option<String>,
    pub from: Option<String>,
    pub call_sid: Option<String>,
    pub account_sid: Option<String>,
    pub call_status: Option<String>,
    pub direction: Option<String>,
    pub caller: Option<String>,
    pub called: Option<String>,
}

impl VoiceCallbackParams {
    /// The dial destination, when one was supplied and is non-empty.
    pub fn destination(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_pascal_case_fields() {
        let params: VoiceCallbackParams = serde_json::from_value(json!({
            "To": "client:agent",
            "From": "+15551234567",
            "CallSid": "CA123",
        }))
        .unwrap();
        assert_eq!(params.to.as_deref(), Some("client:agent"));
        assert_eq!(params.from.as_deref(), Some("+15551234567"));
        assert_eq!(params.call_sid.as_deref(), Some("CA123"));
        assert!(params.call_status.is_none());
    }

    #[test]
    fn test_destination_filters_empty() {
        let with_to = VoiceCallbackParams {
            to: Some("client:agent".into()),
            ..Default::default()
        };
        assert_eq!(with_to.destination(), Some("client:agent"));

        let empty_to = VoiceCallbackParams {
            to: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty_to.destination(), None);

        assert_eq!(VoiceCallbackParams::default().destination(), None);
    }
}
