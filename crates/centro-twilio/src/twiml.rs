//! TwiML call-control documents.
//!
//! The voice webhook answers the platform with a small XML document that
//! says how to connect the call leg. Only the verbs this application uses
//! are modeled: `<Say>` and `<Dial>` with a `<Client>` or `<Number>` noun.
//! Serialization matches the vendor SDK's output byte for byte (single
//! line, UTF-8 declaration, escaped text).

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// A call-control response document under construction.
#[derive(Debug, Clone, Default)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

#[derive(Debug, Clone)]
enum Verb {
    Say(String),
    Dial(Dial),
}

/// A `<Dial>` verb connecting the call to exactly one target noun.
#[derive(Debug, Clone)]
pub struct Dial {
    caller_id: Option<String>,
    target: DialTarget,
}

/// The noun inside a `<Dial>` verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialTarget {
    /// A registered softphone client identifier.
    Client(String),
    /// A raw dialable number.
    Number(String),
}

impl Dial {
    /// Dial a registered softphone client.
    pub fn client(identity: impl Into<String>) -> Self {
        Self {
            caller_id: None,
            target: DialTarget::Client(identity.into()),
        }
    }

    /// Dial a raw number.
    pub fn number(number: impl Into<String>) -> Self {
        Self {
            caller_id: None,
            target: DialTarget::Number(number.into()),
        }
    }

    /// Present the given caller ID on the outbound leg.
    pub fn caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = Some(caller_id.into());
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<Dial");
        if let Some(ref caller_id) = self.caller_id {
            out.push_str(" callerId=\"");
            out.push_str(&escape_xml(caller_id));
            out.push('"');
        }
        out.push('>');
        match &self.target {
            DialTarget::Client(identity) => {
                out.push_str("<Client>");
                out.push_str(&escape_xml(identity));
                out.push_str("</Client>");
            }
            DialTarget::Number(number) => {
                out.push_str("<Number>");
                out.push_str(&escape_xml(number));
                out.push_str("</Number>");
            }
        }
        out.push_str("</Dial>");
    }
}

impl VoiceResponse {
    /// Creates an empty response document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `<Say>` verb speaking the given text.
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say(text.into()));
        self
    }

    /// Appends a `<Dial>` verb.
    pub fn dial(mut self, dial: Dial) -> Self {
        self.verbs.push(Verb::Dial(dial));
        self
    }

    /// Serializes the document.
    pub fn to_xml(&self) -> String {
        let mut out = String::from(XML_DECLARATION);
        if self.verbs.is_empty() {
            out.push_str("<Response/>");
            return out;
        }

        out.push_str("<Response>");
        for verb in &self.verbs {
            match verb {
                Verb::Say(text) => {
                    out.push_str("<Say>");
                    out.push_str(&escape_xml(text));
                    out.push_str("</Say>");
                }
                Verb::Dial(dial) => dial.write_xml(&mut out),
            }
        }
        out.push_str("</Response>");
        out
    }
}

/// Escapes the five XML metacharacters in text and attribute values.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
