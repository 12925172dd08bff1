//! ngrok agent client: control API, public endpoint discovery, subprocess
//! supervision.

mod client;
mod discovery;
mod error;
mod supervisor;
mod types;

pub use client::NgrokClient;
pub use discovery::{discover_public_url, poll_until, Attempt, PollPolicy};
pub use error::NgrokError;
pub use supervisor::NgrokProcess;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOCAL_URL: &str = "https://localhost:5001";

    fn fast_policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            max_attempts,
            interval: Duration::from_millis(1),
        }
    }

    fn tunnel_body(entries: &[(&str, &str)]) -> serde_json::Value {
        let tunnels: Vec<_> = entries
            .iter()
            .map(|(addr, public_url)| {
                serde_json::json!({
                    "config": { "addr": addr },
                    "public_url": public_url
                })
            })
            .collect();
        serde_json::json!({ "tunnels": tunnels })
    }

    #[tokio::test]
    async fn test_list_tunnels() {
        let mock_server = MockServer::start().await;

        let body = tunnel_body(&[(LOCAL_URL, "https://abcd1234.tunnel.example/")]);
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let list = client.list_tunnels().await.unwrap();

        assert_eq!(list.tunnels.len(), 1);
        assert_eq!(list.tunnels[0].config.addr, LOCAL_URL);
        assert_eq!(list.tunnels[0].public_url, "https://abcd1234.tunnel.example/");
    }

    #[tokio::test]
    async fn test_list_tunnels_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(500).set_body_string("agent on fire"))
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let result = client.list_tunnels().await;

        assert!(matches!(result, Err(NgrokError::Api(_))));
    }

    #[tokio::test]
    async fn test_tunnel_serves_requires_addr_and_https() {
        let body = tunnel_body(&[(LOCAL_URL, "https://abcd1234.tunnel.example/")]);
        let list: TunnelList = serde_json::from_value(body).unwrap();
        let tunnel = &list.tunnels[0];

        assert!(tunnel.serves(LOCAL_URL));
        assert!(!tunnel.serves("https://localhost:7777"));

        let insecure = tunnel_body(&[(LOCAL_URL, "http://abcd1234.tunnel.example/")]);
        let list: TunnelList = serde_json::from_value(insecure).unwrap();
        assert!(!list.tunnels[0].serves(LOCAL_URL));
    }

    #[tokio::test]
    async fn test_discover_succeeds_after_agent_warmup() {
        let mock_server = MockServer::start().await;

        // Two cold-start refusals, then the tunnel shows up.
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(2)
            .expect(2)
            .mount(&mock_server)
            .await;

        let body = tunnel_body(&[(LOCAL_URL, "https://abcd1234.tunnel.example/")]);
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let url = discover_public_url(&client, LOCAL_URL, fast_policy(10))
            .await
            .unwrap();

        assert_eq!(url, "https://abcd1234.tunnel.example/");
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_discover_empty_list_retries_until_timeout() {
        let mock_server = MockServer::start().await;

        let body = tunnel_body(&[]);
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let result = discover_public_url(&client, LOCAL_URL, fast_policy(3)).await;

        assert!(matches!(
            result,
            Err(NgrokError::DashboardTimeout { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_discover_excludes_insecure_public_url() {
        let mock_server = MockServer::start().await;

        let body = tunnel_body(&[(LOCAL_URL, "http://abcd1234.tunnel.example/")]);
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let result = discover_public_url(&client, LOCAL_URL, fast_policy(2)).await;

        assert!(matches!(
            result,
            Err(NgrokError::DashboardTimeout { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn test_discover_ignores_tunnels_for_other_addresses() {
        let mock_server = MockServer::start().await;

        let body = tunnel_body(&[
            ("https://localhost:7777", "https://other.tunnel.example/"),
            (LOCAL_URL, "https://abcd1234.tunnel.example/"),
        ]);
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let url = discover_public_url(&client, LOCAL_URL, fast_policy(2))
            .await
            .unwrap();

        assert_eq!(url, "https://abcd1234.tunnel.example/");
    }

    #[tokio::test]
    async fn test_discover_ambiguous_match_fails_immediately() {
        let mock_server = MockServer::start().await;

        let body = tunnel_body(&[
            (LOCAL_URL, "https://first.tunnel.example/"),
            (LOCAL_URL, "https://second.tunnel.example/"),
        ]);
        Mock::given(method("GET"))
            .and(path("/api/tunnels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NgrokClient::new(mock_server.uri()).unwrap();
        let result = discover_public_url(&client, LOCAL_URL, fast_policy(10)).await;

        match result {
            Err(NgrokError::AmbiguousTunnel { matches, .. }) => assert_eq!(matches, 2),
            other => panic!("expected ambiguous tunnel error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_poll_until_passes_one_based_attempt_numbers() {
        let result = poll_until(fast_policy(10), |attempt| async move {
            if attempt < 4 {
                Ok(Attempt::Retry)
            } else {
                Ok(Attempt::Found(attempt))
            }
        })
        .await;

        assert_eq!(result.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_poll_until_spends_exactly_the_budget() {
        let mut calls = 0u32;
        let result: Result<u32, _> = poll_until(fast_policy(3), |_| {
            calls += 1;
            async { Ok(Attempt::Retry) }
        })
        .await;

        assert!(matches!(
            result,
            Err(NgrokError::DashboardTimeout { attempts: 3 })
        ));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_poll_until_fatal_error_stops_early() {
        let mut calls = 0u32;
        let result: Result<u32, _> = poll_until(fast_policy(10), |attempt| {
            calls += 1;
            async move {
                if attempt == 2 {
                    Err(NgrokError::Api("boom".into()))
                } else {
                    Ok(Attempt::Retry)
                }
            }
        })
        .await;

        assert!(matches!(result, Err(NgrokError::Api(_))));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_spawn_missing_binary_fails() {
        let result = NgrokProcess::spawn("/nonexistent/ngrok", LOCAL_URL);
        assert!(matches!(result, Err(NgrokError::Spawn(_))));
    }

    #[tokio::test]
    async fn test_wait_reaps_short_lived_process() {
        // `echo` ignores the argument vector and exits immediately.
        let mut process = NgrokProcess::spawn("echo", LOCAL_URL).unwrap();
        let status = process.wait().await.unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn test_terminate_kills_long_running_process() {
        // `yes` echoes the argument vector forever until killed.
        let mut process = NgrokProcess::spawn("yes", LOCAL_URL).unwrap();
        process.terminate().await.unwrap();
    }
}
