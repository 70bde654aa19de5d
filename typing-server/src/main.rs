use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use typing_core::EmailClassifier;
use typing_persistence::connect_and_migrate;
use typing_server::admin::AdminGate;
use typing_server::ai::{AiService, ChatCompletionsClient};
use typing_server::{AppState, config::Config, create_routes};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Typing Master server...");

    let config = Config::from_env()?;

    if config.secret_key.is_none() && !config.dev_mode {
        warn!("SECRET_KEY is not set; set it outside development");
    }

    // Initialize database connection and run migrations
    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    let admin = AdminGate::new(config.admin_enabled());
    if admin.is_open() {
        info!("Admin endpoints are enabled");
    }

    let ai = match &config.model_access_key {
        Some(key) => {
            let client = ChatCompletionsClient::new(&config.ai_base_url, &config.ai_model, key)?;
            info!("AI flavor text enabled with model {}", config.ai_model);
            AiService::new(Arc::new(client))
        }
        None => {
            info!("MODEL_ACCESS_KEY not set; using canned performance messages");
            AiService::disabled()
        }
    };

    let classifier = EmailClassifier::new(&config.team_email_domains);
    let state = AppState::new(db, admin, ai, classifier);
    let routes = create_routes(state, config.static_dir.clone());

    info!("Server starting on {}:{}", config.host, config.port);

    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST: {}", config.host))?;

    let (addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown((host, config.port), async {
            // Wait for SIGINT (Ctrl+C) or SIGTERM
            #[cfg(unix)]
            {
                let (Ok(mut sigint), Ok(mut sigterm)) = (
                    signal::unix::signal(signal::unix::SignalKind::interrupt()),
                    signal::unix::signal(signal::unix::SignalKind::terminate()),
                ) else {
                    warn!("Failed to install signal handlers; falling back to Ctrl+C");
                    let _ = signal::ctrl_c().await;
                    return;
                };

                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
            }

            #[cfg(not(unix))]
            {
                let _ = signal::ctrl_c().await;
                info!("Received Ctrl+C, shutting down gracefully...");
            }
        })?;

    info!("Server started successfully on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");

    Ok(())
}
