//! Twilio voice webhook service exposed through an ngrok tunnel.
//!
//! Serves the TwiML webhooks and the browser token endpoint, and runs a
//! background task that supervises an ngrok subprocess, discovers its public
//! URL, and keeps the Twilio phone number and application pointed at it.

pub mod api;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod tunnel;

pub use config::Config;
pub use error::AppError;
pub use tunnel::TunnelTask;
