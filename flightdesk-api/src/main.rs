use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use flightdesk_api::{app, AppState};
use flightdesk_infra::{Config, SerpApiClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flightdesk_api=debug,flightdesk_core=debug,flightdesk_infra=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting flightdesk webhook on port {}", config.server.port);

    let provider = SerpApiClient::new(&config.provider).context("Failed to build SerpApi client")?;
    let app = app(AppState::new(Arc::new(provider)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
