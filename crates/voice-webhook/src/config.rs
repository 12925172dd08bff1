//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Twilio configuration (all identifiers required)
    pub twilio: TwilioConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// ngrok tunnel configuration
    #[serde(default)]
    pub ngrok: NgrokConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    /// Account SID
    pub account_sid: String,

    /// API key SID
    pub api_key_sid: String,

    /// API key secret
    pub api_key_secret: String,

    /// TwiML application SID handling outgoing browser calls
    pub application_sid: String,

    /// Phone number whose voice webhook tracks the tunnel (E.164)
    pub phone_number: String,

    /// Client identity dialed on incoming calls and granted in tokens
    #[serde(default = "default_identity")]
    pub identity: String,

    /// Access token lifetime
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Semicolon-separated URLs the server listens on
    #[serde(default = "default_urls")]
    pub urls: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NgrokConfig {
    /// Run the tunnel task at startup
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// ngrok binary to spawn
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Local control API address
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Wait between control API polls
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Poll budget before giving up on the control API
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
        }
    }
}

impl Default for NgrokConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            binary: default_binary(),
            api_url: default_api_url(),
            poll_interval: default_poll_interval(),
            poll_attempts: default_poll_attempts(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_identity() -> String {
    "my-identity".into()
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(3600)
}

fn default_urls() -> String {
    "https://localhost:5001".into()
}

fn default_true() -> bool {
    true
}

fn default_binary() -> String {
    "ngrok".into()
}

fn default_api_url() -> String {
    "http://127.0.0.1:4040".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_poll_attempts() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Note: try_parsing(true) would parse +15551234567 as a
                    // positive number stripping the + prefix. Keep strings
                    // as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
