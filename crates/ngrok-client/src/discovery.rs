//! Public endpoint discovery.
//!
//! The agent's control API starts asynchronously with the subprocess, so the
//! first polls racing a cold start are expected to fail. Failures and empty
//! match sets retry on a fixed interval; only exhausting the whole budget is
//! fatal.

use crate::client::NgrokClient;
use crate::error::NgrokError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Bounded-retry policy for control API polling.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_millis(200),
        }
    }
}

/// Outcome of a single poll attempt.
#[derive(Debug)]
pub enum Attempt<T> {
    /// The poll found what it was looking for.
    Found(T),
    /// Nothing yet; try again after the interval.
    Retry,
}

/// Run `op` until it reports [`Attempt::Found`], sleeping `policy.interval`
/// between attempts. An `Err` from `op` stops the loop immediately; spending
/// the whole attempt budget is [`NgrokError::DashboardTimeout`].
///
/// The attempt counter passed to `op` is 1-based.
pub async fn poll_until<T, F, Fut>(policy: PollPolicy, mut op: F) -> Result<T, NgrokError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Attempt<T>, NgrokError>>,
{
    for attempt in 1..=policy.max_attempts {
        match op(attempt).await? {
            Attempt::Found(value) => return Ok(value),
            Attempt::Retry => {
                if attempt < policy.max_attempts {
                    sleep(policy.interval).await;
                }
            }
        }
    }

    Err(NgrokError::DashboardTimeout {
        attempts: policy.max_attempts,
    })
}

/// Poll the control API until it reports exactly one tunnel fronting
/// `local_url` with a secure public URL, and return that URL.
///
/// Transport errors and empty match sets are transient and retried. Two or
/// more matching tunnels are an ambiguous configuration and fail immediately.
pub async fn discover_public_url(
    client: &NgrokClient,
    local_url: &str,
    policy: PollPolicy,
) -> Result<String, NgrokError> {
    poll_until(policy, move |attempt| {
        let client = client;
        let local_url = local_url;
        async move {
            debug!(attempt, "listing ngrok tunnels");

            let list = match client.list_tunnels().await {
                Ok(list) => list,
                Err(e) => {
                    debug!(attempt, "control API not ready: {e}");
                    return Ok(Attempt::Retry);
                }
            };

            let mut matches = list.tunnels.iter().filter(|t| t.serves(local_url));
            match (matches.next(), matches.next()) {
                (Some(tunnel), None) => Ok(Attempt::Found(tunnel.public_url.clone())),
                (Some(_), Some(_)) => Err(NgrokError::AmbiguousTunnel {
                    local_url: local_url.to_string(),
                    matches: 2 + matches.count(),
                }),
                (None, _) => Ok(Attempt::Retry),
            }
        }
    })
    .await
}
