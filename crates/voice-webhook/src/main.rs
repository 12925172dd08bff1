//! voice-webhook - Entry point.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use twilio_client::TwilioClient;
use voice_webhook::api::{create_router, AppState};
use voice_webhook::config::Config;
use voice_webhook::tunnel::{bind_address, TunnelTask};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting voice webhook service");

    let config = Arc::new(config);

    let twilio = match TwilioClient::new(
        &config.twilio.account_sid,
        &config.twilio.api_key_sid,
        &config.twilio.api_key_secret,
    ) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create Twilio client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(config.clone());
    let app = create_router(state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (started_tx, started_rx) = oneshot::channel();

    // Bind every configured listen URL before signalling the tunnel task.
    let mut servers = Vec::new();
    for url in config.server.urls.split(';').map(str::trim).filter(|u| !u.is_empty()) {
        let addr = match bind_address(url) {
            Ok(a) => a,
            Err(e) => {
                error!("Invalid listen url {}: {}", url, e);
                std::process::exit(1);
            }
        };

        let listener = match TcpListener::bind(addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind to {}: {}", addr, e);
                std::process::exit(1);
            }
        };
        info!("Listening on {}", url);

        let app = app.clone();
        let mut shutdown = shutdown_rx.clone();
        servers.push(tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                shutdown.changed().await.ok();
            });
            if let Err(e) = serve.await {
                error!("Server error: {}", e);
            }
        }));
    }

    let tunnel = if config.ngrok.enabled {
        let task = TunnelTask::new(config.clone(), twilio.clone());
        Some(tokio::spawn(task.run(started_rx, shutdown_rx.clone())))
    } else {
        info!("ngrok tunnel disabled");
        None
    };

    // Host startup is complete once all listeners are bound.
    let _ = started_tx.send(());

    let failed = match tunnel {
        Some(mut handle) => {
            let finished = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    None
                }
                res = &mut handle => Some(res),
            };
            let _ = shutdown_tx.send(true);

            match finished {
                Some(res) => !tunnel_result_ok(res),
                // Give the tunnel task a chance to tear ngrok down.
                None => !tunnel_result_ok((&mut handle).await),
            }
        }
        None => {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            false
        }
    };

    for server in servers {
        let _ = server.await;
    }

    info!("Shut down");
    if failed {
        std::process::exit(1);
    }
}

fn tunnel_result_ok(
    res: Result<Result<(), voice_webhook::AppError>, tokio::task::JoinError>,
) -> bool {
    match res {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!("Tunnel task failed: {}", e);
            false
        }
        Err(e) => {
            error!("Tunnel task panicked: {}", e);
            false
        }
    }
}
