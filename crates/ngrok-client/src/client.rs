//! ngrok control API HTTP client.

use crate::error::NgrokError;
use crate::types::TunnelList;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

/// Client for the local agent's introspection API.
#[derive(Clone)]
pub struct NgrokClient {
    client: Client,
    api_url: String,
}

impl NgrokClient {
    /// Create a new control API client.
    ///
    /// The API only answers on loopback, so the timeout is short.
    pub fn new(api_url: impl Into<String>) -> Result<Self, NgrokError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// List the tunnels the agent currently exposes.
    #[instrument(skip(self))]
    pub async fn list_tunnels(&self) -> Result<TunnelList, NgrokError> {
        let response = self
            .client
            .get(format!("{}/api/tunnels", self.api_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(NgrokError::Api(msg));
        }

        Ok(response.json().await?)
    }
}
