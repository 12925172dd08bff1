//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ngrok_client::NgrokError;
use serde::Serialize;
use thiserror::Error;
use twilio_client::TwilioError;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("ngrok error: {0}")]
    Ngrok(#[from] NgrokError),

    #[error("Twilio error: {0}")]
    Twilio(#[from] TwilioError),

    #[error("ngrok exited unexpectedly: {0}")]
    TunnelExited(std::process::ExitStatus),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Twilio(_) => (StatusCode::BAD_GATEWAY, "TWILIO_ERROR"),
            AppError::Ngrok(_) => (StatusCode::BAD_GATEWAY, "NGROK_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
