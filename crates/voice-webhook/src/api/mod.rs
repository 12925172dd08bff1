//! HTTP API for the webhook service.

mod handlers;
mod types;

pub use handlers::*;
pub use types::*;

use crate::config::Config;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use twilio_client::AccessTokenIssuer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// Voice access token issuer
    pub tokens: Arc<AccessTokenIssuer>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: Arc<Config>) -> Self {
        let tokens = AccessTokenIssuer::new(
            &config.twilio.account_sid,
            &config.twilio.api_key_sid,
            &config.twilio.api_key_secret,
            &config.twilio.application_sid,
            config.twilio.token_ttl,
        );

        Self {
            config,
            tokens: Arc::new(tokens),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/voice/incoming", post(handlers::incoming_call))
        .route("/voice/outgoing", post(handlers::outgoing_call))
        .route("/api/token", post(handlers::issue_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
