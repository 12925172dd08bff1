//! Control API types.

use serde::Deserialize;

/// Response body of `GET /api/tunnels`.
#[derive(Debug, Clone, Deserialize)]
pub struct TunnelList {
    pub tunnels: Vec<Tunnel>,
}

/// A single active tunnel as reported by the local agent.
#[derive(Debug, Clone, Deserialize)]
pub struct Tunnel {
    pub name: Option<String>,
    pub public_url: String,
    pub proto: Option<String>,
    pub config: TunnelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TunnelConfig {
    pub addr: String,
}

impl Tunnel {
    /// Whether this tunnel fronts `local_url` with a secure public endpoint.
    pub fn serves(&self, local_url: &str) -> bool {
        self.config.addr == local_url && self.public_url.starts_with("https://")
    }
}
