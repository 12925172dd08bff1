//! ngrok client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NgrokError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("control API error: {0}")]
    Api(String),

    #[error("failed to spawn ngrok: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ngrok process error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ngrok dashboard did not become available after {attempts} attempts")]
    DashboardTimeout { attempts: u32 },

    #[error("{matches} ngrok tunnels front {local_url}; refusing to pick one")]
    AmbiguousTunnel { local_url: String, matches: usize },
}
