//! API request and response types.

use serde::{Deserialize, Serialize};

/// Form payload Twilio posts when the browser client places a call.
#[derive(Debug, Clone, Deserialize)]
pub struct OutgoingCallForm {
    /// Number the client dialed.
    #[serde(rename = "To")]
    pub to: String,
}

/// Response of the token endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub identity: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
