mod config;
mod game;
mod protocol;
mod server;

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::game::engine;
use crate::server::http;
use crate::server::hub::Hub;
use crate::server::ws::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = ServerConfig::load_or_default();
    config.validate().context("invalid server configuration")?;

    // Create game world
    let world = engine::create_world();
    let hub = Hub::new();
    info!(
        "Game world created ({}x{})",
        config::WORLD_BOUNDS.width(),
        config::WORLD_BOUNDS.height()
    );

    // Start game loop
    tokio::spawn(engine::game_loop(world.clone(), hub.clone()));
    info!("Game loop running at {} TPS", config::TICK_RATE);

    let app = http::router(&config, AppState { world, hub });

    let addr = SocketAddr::new(config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
