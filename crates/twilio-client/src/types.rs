//! Twilio REST API types.

use serde::{Deserialize, Serialize};

/// HTTP method Twilio uses when invoking a callback URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl VoiceMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            VoiceMethod::Get => "GET",
            VoiceMethod::Post => "POST",
        }
    }
}

/// An incoming phone number resource.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingPhoneNumber {
    pub sid: String,
    pub phone_number: String,
    pub friendly_name: String,
    pub voice_url: Option<String>,
    pub voice_method: Option<VoiceMethod>,
}

/// One page of incoming phone number resources.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingPhoneNumberPage {
    pub incoming_phone_numbers: Vec<IncomingPhoneNumber>,
}

/// A TwiML application resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub sid: String,
    pub friendly_name: String,
    pub voice_url: Option<String>,
    pub voice_method: Option<VoiceMethod>,
}
