//! Twilio client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwilioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twilio API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("no incoming phone number resource matches {0}")]
    PhoneNumberNotFound(String),

    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
