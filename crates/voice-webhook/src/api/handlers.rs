//! HTTP request handlers.

use super::types::{HealthResponse, OutgoingCallForm, TokenResponse};
use super::AppState;
use crate::error::AppError;
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;
use twilio_client::VoiceResponse;

const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Answer an incoming call by dialing the configured browser client.
pub async fn incoming_call(State(state): State<AppState>) -> impl IntoResponse {
    let twiml = VoiceResponse::new()
        .dial_client(&state.config.twilio.identity)
        .to_xml();

    ([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], twiml)
}

/// Bridge an outgoing browser call to the number the client dialed.
pub async fn outgoing_call(
    State(state): State<AppState>,
    Form(form): Form<OutgoingCallForm>,
) -> impl IntoResponse {
    info!(to = %form.to, "outgoing call requested");

    let twiml = VoiceResponse::new()
        .dial_number(&form.to, &state.config.twilio.phone_number)
        .to_xml();

    ([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], twiml)
}

/// Issue a voice access token for the browser client.
pub async fn issue_token(State(state): State<AppState>) -> Result<Json<TokenResponse>, AppError> {
    let identity = state.config.twilio.identity.clone();
    let token = state.tokens.issue(&identity)?;

    Ok(Json(TokenResponse { token, identity }))
}
