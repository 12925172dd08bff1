//! Minimal TwiML rendering for voice responses.

/// Builder for the voice TwiML documents this service renders.
#[derive(Debug, Default)]
pub struct VoiceResponse {
    verbs: Vec<String>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dial a registered client by identity.
    pub fn dial_client(mut self, identity: &str) -> Self {
        self.verbs.push(format!(
            "<Dial><Client>{}</Client></Dial>",
            escape(identity)
        ));
        self
    }

    /// Dial a phone number, presenting `caller_id` to the callee.
    pub fn dial_number(mut self, to: &str, caller_id: &str) -> Self {
        self.verbs.push(format!(
            "<Dial callerId=\"{}\">{}</Dial>",
            escape(caller_id),
            escape(to)
        ));
        self
    }

    /// Render the document.
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>{}</Response>",
            self.verbs.concat()
        )
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_client() {
        let xml = VoiceResponse::new().dial_client("my-identity").to_xml();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Response><Dial><Client>my-identity</Client></Dial></Response>"
        );
    }

    #[test]
    fn test_dial_number_sets_caller_id() {
        let xml = VoiceResponse::new()
            .dial_number("+15557654321", "+15551234567")
            .to_xml();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Response><Dial callerId=\"+15551234567\">+15557654321</Dial></Response>"
        );
    }

    #[test]
    fn test_escapes_markup() {
        let xml = VoiceResponse::new().dial_client("a<b>&\"c\"").to_xml();
        assert!(xml.contains("a&lt;b&gt;&amp;&quot;c&quot;"));
    }

    #[test]
    fn test_empty_response() {
        let xml = VoiceResponse::new().to_xml();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response></Response>"
        );
    }
}
