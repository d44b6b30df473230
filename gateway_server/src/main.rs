//! Gateway server: loads settings and the resource catalog, then serves the CRUD routes.
//!
//! Run from repo root: `cargo run -p gateway-server`

use campus_gateway::{app, load_resources, resolve, AppState, GatewayConfig, PostgrestClient};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus_gateway=info,gateway_server=info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    let resources = load_resources(&config).await?;
    let model = resolve(&resources)?;
    tracing::info!(tables = ?model.tables(), timeout = ?config.backend_timeout, "resource catalog loaded");

    let backend = PostgrestClient::new(&config)?;
    let state = AppState::new(Arc::new(backend), model);
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
